use axum::Json;

use crossdesk_core::AppError;
use crossdesk_core::catalog;

use crate::middleware::auth::AuthUser;

use super::model::{CatalogModule, CatalogResponse, MyPermissionsResponse};

/// Exempt from the permission check: any authenticated caller may read the
/// snapshot their own token carries.
#[utoipa::path(
    get,
    path = "/api/permissions",
    responses(
        (status = 200, description = "Caller's permission snapshot", body = MyPermissionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn my_permissions(auth_user: AuthUser) -> Result<Json<MyPermissionsResponse>, AppError> {
    Ok(Json(MyPermissionsResponse {
        username: auth_user.username().to_string(),
        is_administrator: auth_user.is_administrator(),
        permissions: auth_user.permissions().to_vec(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/permissions/catalog",
    responses(
        (status = 200, description = "Full permission catalog grouped by module", body = CatalogResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_catalog(_auth_user: AuthUser) -> Result<Json<CatalogResponse>, AppError> {
    let modules = catalog::GROUPED
        .iter()
        .map(|(module, codes)| CatalogModule {
            module: (*module).to_string(),
            codes: codes.iter().map(|c| (*c).to_string()).collect(),
        })
        .collect();

    Ok(Json(CatalogResponse { modules }))
}
