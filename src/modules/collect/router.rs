use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::collect_product;

pub fn init_collect_router() -> Router<AppState> {
    Router::new().route("/", post(collect_product))
}
