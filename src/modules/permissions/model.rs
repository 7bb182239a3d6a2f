use serde::Serialize;
use utoipa::ToSchema;

/// The caller's frozen permission snapshot as embedded in their token.
#[derive(Debug, Serialize, ToSchema)]
pub struct MyPermissionsResponse {
    pub username: String,
    pub is_administrator: bool,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogModule {
    pub module: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub modules: Vec<CatalogModule>,
}
