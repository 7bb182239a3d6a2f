use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_config, delete_config, get_config, list_configs, update_config};

pub fn init_system_configs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_configs).post(create_config))
        .route(
            "/{id}",
            get(get_config).put(update_config).delete(delete_config),
        )
}
