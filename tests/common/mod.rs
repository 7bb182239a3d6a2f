use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use crossdesk::router::init_router;
use crossdesk::state::AppState;
use crossdesk::utils::password::hash_password;
use crossdesk_config::{AssistConfig, CorsConfig, JwtConfig};

/// Well-known seeded role id (must match migration 0002).
#[allow(dead_code)]
pub const ADMIN_ROLE_ID: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-32-chars-min".to_string(),
    }
}

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig {
            secret: "integration-test-secret-32-chars-min".to_string(),
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        assist_config: AssistConfig {
            translate_endpoint: None,
            image_endpoint: None,
            api_key: String::new(),
            timeout_secs: 1,
        },
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestAccount {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

/// Inserts an account directly, bypassing the HTTP surface, so fixtures can
/// hold arbitrary role references and extra permissions.
#[allow(dead_code)]
pub async fn create_test_account(
    pool: &PgPool,
    username: &str,
    password: &str,
    role_refs: Vec<String>,
    extra_permissions: Vec<String>,
) -> TestAccount {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO accounts (username, password, display_name, role_refs, extra_permissions)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(username)
    .bind(&hashed)
    .bind("Test Account")
    .bind(&role_refs)
    .bind(&extra_permissions)
    .fetch_one(pool)
    .await
    .unwrap();

    TestAccount {
        id,
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_role(
    pool: &PgPool,
    name: &str,
    permissions: Vec<String>,
) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO roles (name, permissions) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(&permissions)
    .fetch_one(pool)
    .await
    .unwrap();

    id
}

#[allow(dead_code)]
pub fn generate_unique_username() -> String {
    format!("user-{}", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!("Response body is not JSON: {:?}", String::from_utf8_lossy(&body))
    })
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Logs in through the API and returns the issued session token.
#[allow(dead_code)]
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let request = json_request(
        "POST",
        "/api/accounts/login",
        serde_json::json!({ "username": username, "password": password }),
    );

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = body_json(response).await;

    body["access_token"]
        .as_str()
        .unwrap_or_else(|| panic!("No access_token. Status: {}, Body: {}", status, body))
        .to_string()
}
