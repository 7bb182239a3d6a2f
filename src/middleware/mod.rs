//! Request-boundary middleware.
//!
//! - [`gate`]: the authorization gate run before any resource handler —
//!   public-path allow-list, token verification, and the method/resource →
//!   permission-code check
//! - [`auth`]: the [`auth::AuthUser`] extractor handing verified claims to
//!   handlers
//! - [`tenancy`]: the [`tenancy::TenantScope`] predicate confining
//!   non-administrators to their own account's rows

pub mod auth;
pub mod gate;
pub mod tenancy;
