//! Permission catalog for the crossdesk API.
//!
//! The catalog is the single source of truth for which permission codes
//! exist. Codes have the form `"<resource>:<action>"` and are grouped by
//! module. Role and account grants are validated against this catalog, and
//! the super-user resolves to the whole of it.

/// Username of the distinguished super-user account. Resolves to the entire
/// catalog and bypasses every permission and isolation check.
pub const ROOT_USERNAME: &str = "root";

/// Reserved role name marking administrators. Accounts holding it bypass
/// tenant-isolation scoping but not explicit permission checks.
pub const ADMIN_ROLE_NAME: &str = "admin";

// =============================================================================
// Account permissions
// =============================================================================

pub const ACCOUNT_VIEW: &str = "account:view";
pub const ACCOUNT_CREATE: &str = "account:create";
pub const ACCOUNT_EDIT: &str = "account:edit";
pub const ACCOUNT_DELETE: &str = "account:delete";

// =============================================================================
// Role permissions
// =============================================================================

pub const ROLE_VIEW: &str = "role:view";
pub const ROLE_CREATE: &str = "role:create";
pub const ROLE_EDIT: &str = "role:edit";
pub const ROLE_DELETE: &str = "role:delete";

// =============================================================================
// Permission-catalog permissions
// =============================================================================

pub const PERMISSION_VIEW: &str = "permission:view";

// =============================================================================
// Shop permissions
// =============================================================================

pub const SHOP_VIEW: &str = "shop:view";
pub const SHOP_CREATE: &str = "shop:create";
pub const SHOP_EDIT: &str = "shop:edit";
pub const SHOP_DELETE: &str = "shop:delete";

// =============================================================================
// Product permissions
// =============================================================================

pub const PRODUCT_VIEW: &str = "product:view";
pub const PRODUCT_CREATE: &str = "product:create";
pub const PRODUCT_EDIT: &str = "product:edit";
pub const PRODUCT_DELETE: &str = "product:delete";

// =============================================================================
// Translation-config permissions
// =============================================================================

pub const TRANSLATION_CONFIG_VIEW: &str = "translation_config:view";
pub const TRANSLATION_CONFIG_CREATE: &str = "translation_config:create";
pub const TRANSLATION_CONFIG_EDIT: &str = "translation_config:edit";
pub const TRANSLATION_CONFIG_DELETE: &str = "translation_config:delete";

// =============================================================================
// System-config permissions
// =============================================================================

pub const SYSTEM_CONFIG_VIEW: &str = "system_config:view";
pub const SYSTEM_CONFIG_CREATE: &str = "system_config:create";
pub const SYSTEM_CONFIG_EDIT: &str = "system_config:edit";
pub const SYSTEM_CONFIG_DELETE: &str = "system_config:delete";

/// The whole catalog, grouped by module.
pub const GROUPED: &[(&str, &[&str])] = &[
    (
        "account",
        &[ACCOUNT_VIEW, ACCOUNT_CREATE, ACCOUNT_EDIT, ACCOUNT_DELETE],
    ),
    ("role", &[ROLE_VIEW, ROLE_CREATE, ROLE_EDIT, ROLE_DELETE]),
    ("permission", &[PERMISSION_VIEW]),
    ("shop", &[SHOP_VIEW, SHOP_CREATE, SHOP_EDIT, SHOP_DELETE]),
    (
        "product",
        &[PRODUCT_VIEW, PRODUCT_CREATE, PRODUCT_EDIT, PRODUCT_DELETE],
    ),
    (
        "translation_config",
        &[
            TRANSLATION_CONFIG_VIEW,
            TRANSLATION_CONFIG_CREATE,
            TRANSLATION_CONFIG_EDIT,
            TRANSLATION_CONFIG_DELETE,
        ],
    ),
    (
        "system_config",
        &[
            SYSTEM_CONFIG_VIEW,
            SYSTEM_CONFIG_CREATE,
            SYSTEM_CONFIG_EDIT,
            SYSTEM_CONFIG_DELETE,
        ],
    ),
];

/// Every code in the catalog, in grouped order.
pub fn all() -> Vec<String> {
    GROUPED
        .iter()
        .flat_map(|(_, codes)| codes.iter().map(|c| (*c).to_string()))
        .collect()
}

/// Whether `code` is a member of the catalog.
pub fn contains(code: &str) -> bool {
    GROUPED
        .iter()
        .any(|(_, codes)| codes.contains(&code))
}

/// Codes from `codes` that are not in the catalog. Used to reject grants of
/// unknown codes at role/account edit time.
pub fn unknown_codes(codes: &[String]) -> Vec<String> {
    codes
        .iter()
        .filter(|c| !contains(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_deduplicated() {
        let all = all();
        let mut sorted = all.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(all.len(), sorted.len());
    }

    #[test]
    fn test_contains_known_codes() {
        assert!(contains(PRODUCT_VIEW));
        assert!(contains(SYSTEM_CONFIG_DELETE));
        assert!(contains(PERMISSION_VIEW));
    }

    #[test]
    fn test_contains_rejects_unknown() {
        assert!(!contains("product:publish"));
        assert!(!contains("unknown:view"));
        assert!(!contains(""));
    }

    #[test]
    fn test_every_code_has_resource_action_shape() {
        for code in all() {
            let (resource, action) = code.split_once(':').expect("code must contain ':'");
            assert!(!resource.is_empty());
            assert!(!action.is_empty());
        }
    }

    #[test]
    fn test_unknown_codes_filters() {
        let codes = vec![
            PRODUCT_VIEW.to_string(),
            "bogus:code".to_string(),
            SHOP_EDIT.to_string(),
        ];
        assert_eq!(unknown_codes(&codes), vec!["bogus:code".to_string()]);
    }
}
