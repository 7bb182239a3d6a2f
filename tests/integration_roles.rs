mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{
    ADMIN_ROLE_ID, authed_json_request, authed_request, body_json, create_test_account,
    create_test_role, generate_unique_username, login, setup_test_app,
};

async fn admin_token(pool: &sqlx::PgPool, app: axum::Router) -> String {
    let username = generate_unique_username();
    create_test_account(pool, &username, "testpass123", vec!["admin".to_string()], vec![]).await;
    login(app, &username, "testpass123").await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_crud(pool: sqlx::PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/roles",
            &token,
            json!({
                "name": "listing-editor",
                "description": "Edits listings",
                "permissions": ["product:view", "product:edit"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let role_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["permissions"], json!(["product:view", "product:edit"]));

    // Duplicate names collide.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/roles",
            &token,
            json!({ "name": "listing-editor" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/roles/{}", role_id),
            &token,
            json!({ "permissions": ["product:view"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["permissions"], json!(["product:view"]));

    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/roles/{}", role_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/roles/{}", role_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grants_are_validated_against_the_catalog(pool: sqlx::PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/roles",
            &token,
            json!({ "name": "mystery", "permissions": ["unicorn:ride", "product:view"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("unicorn:ride"));

    // Role names that parse as UUIDs would be ambiguous with id references.
    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/roles",
            &token,
            json!({ "name": "0b8386cf-ed97-426f-a371-1bb36420f32b" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reserved_admin_role_is_protected(pool: sqlx::PgPool) {
    let app = setup_test_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    let uri = format!("/api/roles/{}", ADMIN_ROLE_ID);

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &uri,
            &token,
            json!({ "name": "superadmin" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(authed_request("DELETE", &uri, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_issued_tokens_keep_their_snapshot_after_role_edits(pool: sqlx::PgPool) {
    let role_id = create_test_role(&pool, "temp-viewer", vec!["product:view".to_string()]).await;

    let username = generate_unique_username();
    create_test_account(
        &pool,
        &username,
        "testpass123",
        vec!["temp-viewer".to_string()],
        vec![],
    )
    .await;

    let app = setup_test_app(pool.clone());
    let member_token = login(app.clone(), &username, "testpass123").await;
    let admin = admin_token(&pool, app.clone()).await;

    // Deleting the role does not touch the already-issued token.
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/roles/{}", role_id),
            &admin,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/products", &member_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A fresh login resolves without the deleted role.
    let fresh_token = login(app.clone(), &username, "testpass123").await;
    let response = app
        .oneshot(authed_request("GET", "/api/products", &fresh_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
