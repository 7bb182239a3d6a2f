use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_product, delete_product, delete_products, get_product, list_products, update_product,
};

pub fn init_products_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .delete(delete_products),
        )
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
