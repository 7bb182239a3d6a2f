mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{
    authed_json_request, authed_request, body_json, create_test_account, generate_unique_username,
    json_request, login, setup_test_app,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_path_requires_token(pool: sqlx::PgPool) {
    let app = setup_test_app(pool);

    let request = authed_request("GET", "/api/products", "");
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/api/products")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], 401);
    assert_eq!(body["message"], "Authentication required");

    // A bearer header with a garbage token is also a uniform 401.
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_permission_names_the_code(pool: sqlx::PgPool) {
    let username = generate_unique_username();
    create_test_account(&pool, &username, "testpass123", vec![], vec![]).await;

    let app = setup_test_app(pool);
    let token = login(app.clone(), &username, "testpass123").await;

    let response = app
        .oneshot(authed_request("GET", "/api/products", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["code"], 403);
    assert_eq!(body["message"], "Missing required permission: product:view");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_present_permission_passes_the_gate(pool: sqlx::PgPool) {
    let username = generate_unique_username();
    create_test_account(
        &pool,
        &username,
        "testpass123",
        vec![],
        vec!["product:view".to_string()],
    )
    .await;

    let app = setup_test_app(pool);
    let token = login(app.clone(), &username, "testpass123").await;

    let response = app
        .oneshot(authed_request("GET", "/api/products", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_method_mapping_distinguishes_actions(pool: sqlx::PgPool) {
    let username = generate_unique_username();
    create_test_account(
        &pool,
        &username,
        "testpass123",
        vec![],
        vec!["product:view".to_string()],
    )
    .await;

    let app = setup_test_app(pool);
    let token = login(app.clone(), &username, "testpass123").await;

    // view is granted, delete is not
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "DELETE",
            "/api/products",
            &token,
            json!({ "ids": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Missing required permission: product:delete"
    );

    // create is not granted either
    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/products",
            &token,
            json!({ "source_url": "https://example.com/p", "title": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Missing required permission: product:create"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_permission_snapshot_endpoint_is_exempt(pool: sqlx::PgPool) {
    let username = generate_unique_username();
    create_test_account(&pool, &username, "testpass123", vec![], vec![]).await;

    let app = setup_test_app(pool);

    // No token at all is still rejected.
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/api/permissions")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Any authenticated caller may read their own snapshot, even with an
    // empty one.
    let token = login(app.clone(), &username, "testpass123").await;
    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/permissions", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["permissions"].as_array().unwrap().len(), 0);

    // The catalog sub-route is not on the exemption list.
    let response = app
        .oneshot(authed_request("GET", "/api/permissions/catalog", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_paths_skip_authentication(pool: sqlx::PgPool) {
    let app = setup_test_app(pool);

    let username = generate_unique_username();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/accounts/register",
            json!({ "username": username, "password": "testpass123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/accounts/login",
            json!({ "username": username, "password": "testpass123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_user_bypasses_permission_checks(pool: sqlx::PgPool) {
    // The root account carries no roles and no extra permissions at all.
    create_test_account(&pool, "root", "rootpass123", vec![], vec![]).await;

    let app = setup_test_app(pool);
    let token = login(app.clone(), "root", "rootpass123").await;

    for uri in [
        "/api/accounts",
        "/api/roles",
        "/api/products",
        "/api/system_configs",
    ] {
        let response = app
            .clone()
            .oneshot(authed_request("GET", uri, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {} should pass", uri);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_root_resolves_the_full_catalog(pool: sqlx::PgPool) {
    create_test_account(&pool, "root", "rootpass123", vec![], vec![]).await;

    let app = setup_test_app(pool);
    let token = login(app.clone(), "root", "rootpass123").await;

    let response = app
        .oneshot(authed_request("GET", "/api/permissions", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let permissions = body["permissions"].as_array().unwrap();
    assert_eq!(permissions.len(), crossdesk_core::catalog::all().len());
    assert!(permissions.iter().any(|p| p == "product:view"));
    assert!(permissions.iter().any(|p| p == "system_config:delete"));
}
