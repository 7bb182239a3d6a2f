use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::gate::authorize_request;
use crate::modules::accounts::router::init_accounts_router;
use crate::modules::assist::router::init_assist_router;
use crate::modules::collect::router::init_collect_router;
use crate::modules::permissions::router::init_permissions_router;
use crate::modules::products::router::init_products_router;
use crate::modules::roles::router::init_roles_router;
use crate::modules::shops::router::init_shops_router;
use crate::modules::system_configs::router::init_system_configs_router;
use crate::modules::translation_configs::router::init_translation_configs_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/accounts", init_accounts_router())
                .nest("/roles", init_roles_router())
                .nest("/permissions", init_permissions_router())
                .nest("/shops", init_shops_router())
                .nest("/products", init_products_router())
                .nest("/translation_configs", init_translation_configs_router())
                .nest("/system_configs", init_system_configs_router())
                .nest("/collect", init_collect_router())
                .nest("/ai", init_assist_router())
                // Every /api route passes the authorization gate first.
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    authorize_request,
                )),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
