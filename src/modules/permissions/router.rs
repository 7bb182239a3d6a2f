use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_catalog, my_permissions};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_permissions))
        .route("/catalog", get(get_catalog))
}
