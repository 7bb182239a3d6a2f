//! Request authorization gate.
//!
//! Layered over the whole `/api` router and run before any resource handler.
//! The flow per request:
//!
//! 1. Public path prefixes pass through with no credential.
//! 2. Everything else needs a `Bearer` token that verifies.
//! 3. The HTTP method maps to an action (`GET`→view, `POST`→create,
//!    `PUT`/`PATCH`→edit, `DELETE`→delete); unmapped methods (`OPTIONS`,
//!    `HEAD`) skip the permission check.
//! 4. The `/api/<resource>` segment maps to a permission module through a
//!    static table; a resource missing from the table is rejected, never
//!    silently allowed.
//! 5. The super-user and exempt (path, method) pairs bypass the check;
//!    everyone else must carry `"<module>:<action>"` in their token's
//!    permission snapshot, or the request ends 403 naming the missing code.
//!
//! The gate is stateless per request: every request re-verifies its own
//! token and nothing is cached across requests.

use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::Response,
};

use crossdesk_auth::verify_token;
use crossdesk_core::AppError;

use crate::state::AppState;

/// Paths reachable with no session credential. Login and registration issue
/// credentials; the collect endpoint authenticates with the long-lived API
/// token instead.
const PUBLIC_PREFIXES: &[&str] = &[
    "/api/accounts/login",
    "/api/accounts/register",
    "/api/collect",
];

/// Authenticated-but-permission-free (path, method) pairs: reading one's own
/// permission snapshot and the AI-assist proxies.
const EXEMPT_ROUTES: &[(&str, Method)] = &[
    ("/api/permissions", Method::GET),
    ("/api/ai/translate", Method::POST),
    ("/api/ai/image", Method::POST),
];

/// Route segment → permission module. Declared here instead of derived from
/// the path so that an unmapped resource is a hard error.
const RESOURCE_MODULES: &[(&str, &str)] = &[
    ("accounts", "account"),
    ("roles", "role"),
    ("permissions", "permission"),
    ("shops", "shop"),
    ("products", "product"),
    ("translation_configs", "translation_config"),
    ("system_configs", "system_config"),
];

/// Canonical action for an HTTP method. `None` means the method carries no
/// permission semantics and skips the check.
pub fn action_for_method(method: &Method) -> Option<&'static str> {
    if method == Method::GET {
        Some("view")
    } else if method == Method::POST {
        Some("create")
    } else if method == Method::PUT || method == Method::PATCH {
        Some("edit")
    } else if method == Method::DELETE {
        Some("delete")
    } else {
        None
    }
}

/// Permission module for an `/api/<resource>/...` path, from the static
/// table. `None` for paths outside `/api` or with an undeclared resource.
pub fn resource_module(path: &str) -> Option<&'static str> {
    let mut segments = path.trim_start_matches('/').split('/');
    if segments.next()? != "api" {
        return None;
    }
    let resource = segments.next()?;

    RESOURCE_MODULES
        .iter()
        .find(|(segment, _)| *segment == resource)
        .map(|(_, module)| *module)
}

/// The permission code a request must carry, if any.
pub fn required_permission(method: &Method, path: &str) -> Option<String> {
    let action = action_for_method(method)?;
    let module = resource_module(path)?;
    Some(format!("{}:{}", module, action))
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

pub fn is_exempt(path: &str, method: &Method) -> bool {
    EXEMPT_ROUTES
        .iter()
        .any(|(p, m)| *p == path && m == method)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// The gate middleware. On success the verified claims are stashed in
/// request extensions for the `AuthUser` extractor.
pub async fn authorize_request(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    if is_public_path(&path) {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::unauthorized(anyhow!("Authentication required")))?;
    let claims = verify_token(token, &state.jwt_config)?;

    let method = req.method().clone();

    if !claims.is_super_user() && !is_exempt(&path, &method) {
        if let Some(action) = action_for_method(&method) {
            let module = resource_module(&path).ok_or_else(|| {
                AppError::forbidden(anyhow!("No permission mapping for path: {}", path))
            })?;
            let code = format!("{}:{}", module, action);

            if !claims.has_permission(&code) {
                return Err(AppError::forbidden(anyhow!(
                    "Missing required permission: {}",
                    code
                )));
            }
        }
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
