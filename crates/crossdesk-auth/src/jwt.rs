use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crossdesk_config::JwtConfig;
use crossdesk_core::AppError;

use crate::claims::Claims;

/// Fixed session-token lifetime. There is no refresh flow; clients obtain a
/// new token by logging in again.
pub const TOKEN_TTL_SECS: usize = 86_400;

/// Issues a signed session token for an account.
///
/// `permissions` is the resolved snapshot from login time; it is embedded
/// verbatim and never re-derived while the token lives.
pub fn issue_token(
    account_id: Uuid,
    username: &str,
    role_refs: Vec<String>,
    permissions: Vec<String>,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: account_id.to_string(),
        username: username.to_string(),
        role_refs,
        permissions,
        iat: now,
        nbf: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to issue token: {}", e)))
}

/// Verifies signature, expiry, and not-before, and returns the claims.
///
/// Every failure mode (tampered, expired, malformed) collapses into one
/// uniform 401 so callers cannot distinguish why a credential was rejected.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation.validate_nbf = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired token")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
        }
    }

    fn encode_raw(claims: &Claims, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_identity() {
        let config = test_config();
        let account_id = Uuid::new_v4();
        let role_refs = vec!["editor".to_string(), "viewer".to_string()];
        let permissions = vec!["product:view".to_string(), "shop:create".to_string()];

        let token = issue_token(
            account_id,
            "ops-user",
            role_refs.clone(),
            permissions.clone(),
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.username, "ops-user");
        assert_eq!(claims.role_refs, role_refs);
        assert_eq!(claims.permissions, permissions);
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let config = test_config();
        assert!(verify_token("not-a-token", &config).is_err());
        assert!(verify_token("", &config).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = test_config();
        let token = issue_token(Uuid::new_v4(), "ops", vec![], vec![], &config).unwrap();

        let other = JwtConfig {
            secret: "a-different-secret-also-32-characters-x".to_string(),
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let config = test_config();
        let token = issue_token(Uuid::new_v4(), "ops", vec![], vec![], &config).unwrap();

        // Flip a character inside the payload segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[5] = if payload[5] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert!(verify_token(&tampered, &config).is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;

        // One second inside the window: iat such that exp = now + 1.
        let fresh = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "ops".to_string(),
            role_refs: vec![],
            permissions: vec![],
            iat: now + 1 - TOKEN_TTL_SECS,
            nbf: now + 1 - TOKEN_TTL_SECS,
            exp: now + 1,
        };
        assert!(verify_token(&encode_raw(&fresh, &config), &config).is_ok());

        // One second past the window.
        let stale = Claims {
            exp: now - 1,
            iat: now - 1 - TOKEN_TTL_SECS,
            nbf: now - 1 - TOKEN_TTL_SECS,
            ..fresh.clone()
        };
        assert!(verify_token(&encode_raw(&stale, &config), &config).is_err());
    }

    #[test]
    fn test_not_before_enforced() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;

        let future = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "ops".to_string(),
            role_refs: vec![],
            permissions: vec![],
            iat: now + 600,
            nbf: now + 600,
            exp: now + 600 + TOKEN_TTL_SECS,
        };
        assert!(verify_token(&encode_raw(&future, &config), &config).is_err());
    }

    #[test]
    fn test_failures_are_uniform() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;

        let expired = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "ops".to_string(),
            role_refs: vec![],
            permissions: vec![],
            iat: now - 2 * TOKEN_TTL_SECS,
            nbf: now - 2 * TOKEN_TTL_SECS,
            exp: now - TOKEN_TTL_SECS,
        };
        let expired_err = verify_token(&encode_raw(&expired, &config), &config).unwrap_err();
        let tampered_err = verify_token("aaaa.bbbb.cccc", &config).unwrap_err();

        assert_eq!(expired_err.status.as_u16(), 401);
        assert_eq!(tampered_err.status.as_u16(), 401);
        assert_eq!(
            expired_err.error.to_string(),
            tampered_err.error.to_string()
        );
    }
}
