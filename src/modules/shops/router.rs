use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_shop, delete_shop, get_shop, list_shops, update_shop};

pub fn init_shops_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shops).post(create_shop))
        .route("/{id}", get(get_shop).put(update_shop).delete(delete_shop))
}
