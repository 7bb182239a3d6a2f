use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{process_image, translate};

pub fn init_assist_router() -> Router<AppState> {
    Router::new()
        .route("/translate", post(translate))
        .route("/image", post(process_image))
}
