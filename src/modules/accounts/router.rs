use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    change_password, create_account, delete_account, get_account, list_accounts, login, register,
    rotate_api_token, update_account,
};

pub fn init_accounts_router() -> Router<AppState> {
    Router::new()
        // Public (allow-listed by the gate)
        .route("/login", post(login))
        .route("/register", post(register))
        // Gated management endpoints
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/{id}/password", put(change_password))
        .route("/{id}/token", put(rotate_api_token))
}
