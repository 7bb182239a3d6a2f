use sqlx::PgPool;

use crossdesk_config::{AssistConfig, CorsConfig, JwtConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub assist_config: AssistConfig,
}

/// Builds the application state from the environment. Fails when required
/// configuration (the JWT secret) is absent — startup must not continue with
/// a forgeable signing key.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    Ok(AppState {
        db: crossdesk_db::init_db_pool().await,
        jwt_config: JwtConfig::from_env()?,
        cors_config: CorsConfig::from_env(),
        assist_config: AssistConfig::from_env(),
    })
}
