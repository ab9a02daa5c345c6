mod common;

use axum::http::StatusCode;
use common::{
    app_with, get, json_request, lazy_pool, offline_app, remote_auth_config, sample_user, send,
    test_jwt_config, token_for,
};
use serde_json::json;
use taskhub_auth::issue_token;
use taskhub_config::JwtConfig;
use uuid::Uuid;

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(offline_app(), get("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Taskhub API is running"));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (status, body) = send(offline_app(), get("/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/companies").is_some());
    assert!(body["paths"].get("/api/users/{id}").is_some());
    assert!(body["paths"].get("/api/auth/token").is_some());
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let (status, body) = send(offline_app(), get("/api/auth/me", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_me_with_garbage_token_is_unauthorized() {
    let (status, body) = send(offline_app(), get("/api/auth/me", Some("not.a.jwt"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_me_with_expired_token_is_unauthorized() {
    let token = issue_token(&sample_user(true, true), Some(-60), &test_jwt_config()).unwrap();

    let (status, body) = send(offline_app(), get("/api/auth/me", Some(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_me_with_foreign_secret_is_unauthorized() {
    let foreign = JwtConfig {
        secret: "someone_elses_secret".to_string(),
        ..test_jwt_config()
    };
    let token = issue_token(&sample_user(true, true), None, &foreign).unwrap();

    let (status, _) = send(offline_app(), get("/api/auth/me", Some(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_claims_for_active_user() {
    let user = sample_user(true, false);

    let (status, body) = send(offline_app(), get("/api/auth/me", Some(&token_for(&user)))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], user.id.to_string());
    assert_eq!(body["username"], "alice.johnson");
    assert_eq!(body["is_admin"], false);
    assert_eq!(body["exp"].as_i64().unwrap() - body["iat"].as_i64().unwrap(), 600);
}

#[tokio::test]
async fn test_me_for_inactive_user_is_forbidden() {
    let token = token_for(&sample_user(false, true));

    let (status, body) = send(offline_app(), get("/api/auth/me", Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn test_non_admin_cannot_create_company() {
    let token = token_for(&sample_user(true, false));
    let request = json_request(
        "POST",
        "/api/companies",
        Some(&token),
        json!({ "name": "Acme" }),
    );

    let (status, _) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_inactive_admin_cannot_delete_user() {
    let token = token_for(&sample_user(false, true));
    let request = json_request(
        "DELETE",
        &format!("/api/users/{}", Uuid::new_v4()),
        Some(&token),
        json!({}),
    );

    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn test_write_routes_require_token() {
    let request = json_request(
        "POST",
        "/api/tasks",
        None,
        json!({ "user_id": Uuid::new_v4() }),
    );

    let (status, _) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_list_filter_is_bad_request() {
    let token = token_for(&sample_user(true, false));

    let (status, body) = send(
        offline_app(),
        get("/api/companies?mode=BANKRUPT", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query parameters"));
}

#[tokio::test]
async fn test_token_request_missing_field_is_bad_request() {
    let request = json_request(
        "POST",
        "/api/auth/token",
        None,
        json!({ "email": "alice.johnson@acme.com" }),
    );

    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_token_request_empty_password_is_unprocessable() {
    let request = json_request(
        "POST",
        "/api/auth/token",
        None,
        json!({ "email": "alice.johnson@acme.com", "password": "" }),
    );

    let (status, _) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_token_endpoint_disabled_with_remote_verifier() {
    let app = app_with(lazy_pool(), remote_auth_config());
    let request = json_request(
        "POST",
        "/api/auth/token",
        None,
        json!({ "email": "alice.johnson@acme.com", "password": "alice.johnson@password" }),
    );

    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remote_verifier_rejects_local_tokens() {
    let app = app_with(lazy_pool(), remote_auth_config());
    let token = token_for(&sample_user(true, true));

    let (status, _) = send(app, get("/api/auth/me", Some(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
