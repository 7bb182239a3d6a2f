use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crossdesk_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    Account, AccountFilterParams, ApiTokenResponse, ChangePasswordDto, CreateAccountDto, LoginDto,
    LoginResponse, MessageResponse, PaginatedAccountsResponse, RegisterDto, UpdateAccountDto,
};
use super::service;

#[utoipa::path(
    post,
    path = "/api/accounts/register",
    request_body = RegisterDto,
    responses(
        (status = 200, description = "Account created", body = Account),
        (status = 400, description = "Username taken or reserved")
    ),
    tag = "Accounts"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterDto>,
) -> Result<Json<Account>, AppError> {
    let account = service::register(&state.db, dto).await?;
    Ok(Json(account))
}

#[utoipa::path(
    post,
    path = "/api/accounts/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Accounts"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = service::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/accounts",
    params(
        ("username" = Option<String>, Query, description = "Filter by username substring"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Offset into the result set")
    ),
    responses(
        (status = 200, description = "List of accounts", body = PaginatedAccountsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<AccountFilterParams>,
) -> Result<Json<PaginatedAccountsResponse>, AppError> {
    let result = service::list_accounts(&state.db, params).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account details", body = Account),
        (status = 404, description = "Account not found")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn get_account(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account = service::get_account(&state.db, id).await?;
    Ok(Json(account))
}

#[utoipa::path(
    post,
    path = "/api/accounts",
    request_body = CreateAccountDto,
    responses(
        (status = 200, description = "Account created", body = Account),
        (status = 422, description = "Unknown permission codes")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn create_account(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAccountDto>,
) -> Result<Json<Account>, AppError> {
    let account = service::create_account(&state.db, dto).await?;
    Ok(Json(account))
}

#[utoipa::path(
    put,
    path = "/api/accounts/{id}",
    params(("id" = Uuid, Path, description = "Account ID")),
    request_body = UpdateAccountDto,
    responses(
        (status = 200, description = "Account updated", body = Account),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Unknown permission codes")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn update_account(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAccountDto>,
) -> Result<Json<Account>, AppError> {
    let account = service::update_account(&state.db, id, dto).await?;
    Ok(Json(account))
}

#[utoipa::path(
    delete,
    path = "/api/accounts/{id}",
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 403, description = "Super-user cannot be deleted"),
        (status = 404, description = "Account not found")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn delete_account(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    service::delete_account(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Account deleted".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/accounts/{id}/password",
    params(("id" = Uuid, Path, description = "Account ID")),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Current password is wrong")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    service::change_password(&state.db, id, dto, auth_user.account_id()?).await?;
    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/accounts/{id}/token",
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "New API token issued", body = ApiTokenResponse),
        (status = 404, description = "Account not found")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn rotate_api_token(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiTokenResponse>, AppError> {
    let response = service::rotate_api_token(&state.db, id).await?;
    Ok(Json(response))
}
