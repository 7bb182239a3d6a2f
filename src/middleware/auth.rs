use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crossdesk_auth::{Claims, verify_token};
use crossdesk_core::AppError;

use crate::state::AppState;

/// Extractor that hands a handler the verified claims of the caller.
///
/// The gate verifies the token once per request and stashes the claims in
/// request extensions; the extractor prefers that copy and only falls back
/// to verifying the bearer header itself (e.g. in handler-level tests that
/// bypass the gate).
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn account_id(&self) -> Result<Uuid, AppError> {
        self.0.account_id()
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn has_permission(&self, code: &str) -> bool {
        self.0.has_permission(code)
    }

    pub fn is_administrator(&self) -> bool {
        self.0.is_administrator()
    }

    pub fn is_super_user(&self) -> bool {
        self.0.is_super_user()
    }

    pub fn permissions(&self) -> &[String] {
        &self.0.permissions
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthUser(claims.clone()));
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Authentication required")))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized(anyhow!("Authentication required")))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(username: &str, role_refs: Vec<&str>, permissions: Vec<&str>) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role_refs: role_refs.into_iter().map(String::from).collect(),
            permissions: permissions.into_iter().map(String::from).collect(),
            iat: 1_700_000_000,
            nbf: 1_700_000_000,
            exp: 1_700_086_400,
        }
    }

    #[test]
    fn test_permission_helpers() {
        let user = AuthUser(claims("ops", vec!["editor"], vec!["product:view"]));
        assert!(user.has_permission("product:view"));
        assert!(!user.has_permission("product:delete"));
        assert!(!user.is_administrator());
        assert!(!user.is_super_user());
    }

    #[test]
    fn test_admin_bypasses_snapshot() {
        let user = AuthUser(claims("ops", vec!["admin"], vec![]));
        assert!(user.is_administrator());
        assert!(user.has_permission("system_config:delete"));
    }
}
