//! Tenant isolation for account-scoped resources.
//!
//! Shops, products, and translation configs belong to one account. Services
//! for those resources take a [`TenantScope`] and compose it into every
//! query as a mandatory AND-predicate, so a non-administrator's reads and
//! writes can never leave their own account's rows — whatever filters the
//! request supplies. Creates stamp the owning account from the caller's
//! identity, never from the payload.

use uuid::Uuid;

use crossdesk_core::AppError;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Administrators and the super-user: all accounts' rows.
    Unrestricted,
    /// Everyone else: rows owned by this account only.
    Account(Uuid),
}

impl TenantScope {
    pub fn for_caller(caller: &AuthUser) -> Result<Self, AppError> {
        if caller.is_super_user() || caller.is_administrator() {
            Ok(Self::Unrestricted)
        } else {
            Ok(Self::Account(caller.account_id()?))
        }
    }

    /// Bind value for `($n::uuid IS NULL OR account_id = $n)` predicates:
    /// `NULL` disables the filter for unrestricted callers.
    pub fn filter_id(&self) -> Option<Uuid> {
        match self {
            Self::Unrestricted => None,
            Self::Account(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossdesk_auth::Claims;

    fn auth_user(username: &str, role_refs: Vec<&str>) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role_refs: role_refs.into_iter().map(String::from).collect(),
            permissions: vec![],
            iat: 1_700_000_000,
            nbf: 1_700_000_000,
            exp: 1_700_086_400,
        })
    }

    #[test]
    fn test_plain_caller_is_scoped() {
        let caller = auth_user("ops", vec!["editor"]);
        let scope = TenantScope::for_caller(&caller).unwrap();
        assert_eq!(scope, TenantScope::Account(caller.account_id().unwrap()));
        assert!(scope.filter_id().is_some());
    }

    #[test]
    fn test_administrator_is_unrestricted() {
        let caller = auth_user("ops", vec!["admin"]);
        let scope = TenantScope::for_caller(&caller).unwrap();
        assert_eq!(scope, TenantScope::Unrestricted);
        assert_eq!(scope.filter_id(), None);
    }

    #[test]
    fn test_super_user_is_unrestricted() {
        let caller = auth_user("root", vec![]);
        let scope = TenantScope::for_caller(&caller).unwrap();
        assert_eq!(scope, TenantScope::Unrestricted);
    }

    #[test]
    fn test_malformed_subject_is_rejected() {
        let mut caller = auth_user("ops", vec![]);
        caller.0.sub = "not-a-uuid".to_string();
        assert!(TenantScope::for_caller(&caller).is_err());
    }
}
