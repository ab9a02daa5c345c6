mod common;

use axum::http::StatusCode;
use common::{
    app_with, get, json_request, local_auth_config, seed_admin, seed_company, send, token_for,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

async fn put_company(pool: &PgPool, token: &str, id: Uuid, body: Value) -> (StatusCode, Value) {
    let app = app_with(pool.clone(), local_auth_config());
    let request = json_request("PUT", &format!("/api/companies/{}", id), Some(token), body);
    send(app, request).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_company_as_admin(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;

    let app = app_with(pool.clone(), local_auth_config());
    let request = json_request(
        "POST",
        "/api/companies",
        Some(&token_for(&admin)),
        json!({ "name": "Globex", "description": "Widgets", "rating": 2 }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Globex");
    assert_eq!(body["mode"], "PENDING");
    assert_eq!(body["rating"], 2);
    assert!(body["id"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_companies_paginates(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let token = token_for(&admin);

    let app = app_with(pool.clone(), local_auth_config());
    let (status, body) = send(app, get("/api/companies?name=Acme&size=1", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["size"], 1);
    assert_eq!(body["meta"]["has_more"], false);
    assert_eq!(body["data"][0]["mode"], "STARTUP");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_companies_filters_by_minimum_rating(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    seed_company(&pool, "Initech", 1).await;
    seed_company(&pool, "Hooli", 3).await;
    seed_company(&pool, "Umbrella", 5).await;
    let token = token_for(&admin);

    let app = app_with(pool.clone(), local_auth_config());
    let (status, body) = send(app, get("/api/companies?rating=3", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 3);
    let ratings: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["rating"].as_i64().unwrap())
        .collect();
    assert!(ratings.iter().all(|r| *r >= 3));

    let app = app_with(pool.clone(), local_auth_config());
    let (_, body) = send(app, get("/api/companies", Some(&token))).await;
    assert_eq!(body["meta"]["total"], 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_company_touches_timestamp_only_on_change(pool: PgPool) {
    let (company_id, admin) = seed_admin(&pool).await;
    let token = token_for(&admin);

    let app = app_with(pool.clone(), local_auth_config());
    let (_, before) = send(app, get(&format!("/api/companies/{}", company_id), Some(&token))).await;

    let (status, same) = put_company(&pool, &token, company_id, json!({ "rating": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(same["updated_at"], before["updated_at"]);

    let (status, changed) =
        put_company(&pool, &token, company_id, json!({ "name": "Acme Holdings" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(changed["name"], "Acme Holdings");
    assert_eq!(changed["rating"], 4);
    assert_ne!(changed["updated_at"], before["updated_at"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_company_is_not_found(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let token = token_for(&admin);
    let missing = Uuid::new_v4();

    let app = app_with(pool.clone(), local_auth_config());
    let (status, body) = send(app, get(&format!("/api/companies/{}", missing), Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Company not found");

    let (status, _) = put_company(&pool, &token, missing, json!({ "rating": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let app = app_with(pool.clone(), local_auth_config());
    let request = json_request(
        "DELETE",
        &format!("/api/companies/{}", missing),
        Some(&token),
        json!({}),
    );
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_company_returns_no_content(pool: PgPool) {
    let (_, admin) = seed_admin(&pool).await;
    let token = token_for(&admin);
    let doomed = seed_company(&pool, "Initech", 1).await;
    let uri = format!("/api/companies/{}", doomed);

    let app = app_with(pool.clone(), local_auth_config());
    let (status, body) = send(app, json_request("DELETE", &uri, Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::String(String::new()));

    let app = app_with(pool.clone(), local_auth_config());
    let (status, _) = send(app, get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
