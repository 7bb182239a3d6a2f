use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crossdesk_core::AppError;
use crossdesk_core::catalog::{ADMIN_ROLE_NAME, ROOT_USERNAME};

/// Claims embedded in a session token.
///
/// `permissions` is the snapshot resolved at issuance — handlers never
/// re-derive it from the store. `role_refs` carries the account's raw role
/// references (ids or names) so the reserved `admin` role stays visible
/// without a lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account id (subject claim)
    pub sub: String,
    /// Account username
    pub username: String,
    /// Role references held by the account (role ids or names)
    pub role_refs: Vec<String>,
    /// Resolved permission snapshot, frozen at issuance
    pub permissions: Vec<String>,
    /// Issued-at (Unix seconds)
    pub iat: usize,
    /// Not-before (Unix seconds)
    pub nbf: usize,
    /// Expiry (Unix seconds)
    pub exp: usize,
}

impl Claims {
    /// Whether the account holds the reserved `admin` role
    /// (case-insensitive match on the role-reference list).
    pub fn is_administrator(&self) -> bool {
        self.role_refs
            .iter()
            .any(|r| r.eq_ignore_ascii_case(ADMIN_ROLE_NAME))
    }

    /// Whether this is the distinguished super-user account.
    pub fn is_super_user(&self) -> bool {
        self.username == ROOT_USERNAME
    }

    /// Administrators hold every permission; everyone else is checked
    /// against the frozen snapshot.
    pub fn has_permission(&self, code: &str) -> bool {
        self.is_administrator() || self.permissions.iter().any(|p| p == code)
    }

    pub fn account_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid account id in token")))
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
    fn test_has_permission_from_snapshot() {
        let claims = claims("ops", vec!["editor"], vec!["product:view", "shop:edit"]);
        assert!(claims.has_permission("product:view"));
        assert!(claims.has_permission("shop:edit"));
        assert!(!claims.has_permission("product:delete"));
    }

    #[test]
    fn test_administrator_has_every_permission() {
        let claims = claims("ops", vec!["admin"], vec![]);
        assert!(claims.is_administrator());
        assert!(claims.has_permission("product:delete"));
        assert!(claims.has_permission("anything:at_all"));
    }

    #[test]
    fn test_administrator_match_is_case_insensitive() {
        let claims = claims("ops", vec!["Admin"], vec![]);
        assert!(claims.is_administrator());
    }

    #[test]
    fn test_non_admin_role_refs() {
        let claims = claims("ops", vec!["editor", "viewer"], vec![]);
        assert!(!claims.is_administrator());
        assert!(!claims.has_permission("product:view"));
    }

    #[test]
    fn test_super_user_flag() {
        assert!(claims("root", vec![], vec![]).is_super_user());
        assert!(!claims("rooty", vec![], vec![]).is_super_user());
    }

    #[test]
    fn test_account_id_parses() {
        let id = Uuid::new_v4();
        let mut c = claims("ops", vec![], vec![]);
        c.sub = id.to_string();
        assert_eq!(c.account_id().unwrap(), id);

        c.sub = "not-a-uuid".to_string();
        assert!(c.account_id().is_err());
    }

    #[test]
    fn test_claims_round_trip_serde() {
        let c = claims("ops", vec!["editor"], vec!["product:view"]);
        let json = serde_json::to_string(&c).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.username, "ops");
        assert_eq!(back.role_refs, vec!["editor"]);
        assert_eq!(back.permissions, vec!["product:view"]);
    }
}
