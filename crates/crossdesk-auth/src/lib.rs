//! # crossdesk-auth
//!
//! Session-token claims and JWT utilities for the crossdesk API.
//!
//! A session token is a signed, time-bounded bearer credential embedding the
//! account's identity and a permission snapshot resolved at login. The
//! snapshot is frozen at issuance: role or permission edits made afterwards
//! only take effect once the token expires and a new one is issued. There is
//! no refresh mechanism and no server-side revocation.
//!
//! # Example
//!
//! ```ignore
//! use crossdesk_auth::{issue_token, verify_token};
//! use crossdesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = issue_token(
//!     account_id,
//!     "ops-user",
//!     vec![role_id.to_string()],
//!     vec!["product:view".to_string()],
//!     &config,
//! )?;
//!
//! let claims = verify_token(&token, &config)?;
//! assert!(claims.has_permission("product:view"));
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{TOKEN_TTL_SECS, issue_token, verify_token};
