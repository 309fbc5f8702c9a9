//! HTTP-level integration tests for the `/api/monitor/refresh` sweep.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, post_json, post_with_cookies, response_cookie};
use sqlx::PgPool;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign a user up and return (user id, cookie header).
async fn signup(pool: &PgPool, username: &str) -> (i64, String) {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "sturdy-pw-1",
        "confirmPassword": "sturdy-pw-1",
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let access = response_cookie(&response, "access_token").expect("access cookie must be set");
    let refresh = response_cookie(&response, "refresh_token").expect("refresh cookie must be set");
    let json = body_json(response).await;
    let id = json["id"].as_i64().expect("id must be a number");
    (id, common::auth_cookie_header(&access, &refresh))
}

/// Insert a project row directly, bypassing the probe-on-create path.
async fn insert_project(
    pool: &PgPool,
    owner_id: i64,
    name: &str,
    category: &str,
    health_check_url: Option<&str>,
    db_url: Option<&str>,
    enabled: bool,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO projects (owner_id, name, url, health_check_url, db_url, db_key, category, enabled)
         VALUES ($1, $2, 'https://example.com', $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(owner_id)
    .bind(name)
    .bind(health_check_url)
    .bind(db_url)
    .bind(db_url.map(|_| "service-key"))
    .bind(category)
    .bind(enabled)
    .fetch_one(pool)
    .await
    .expect("insert should succeed")
}

/// Poll until the background recorder has written `expected` history rows.
async fn wait_for_history(pool: &PgPool, expected: i64) {
    for _ in 0..50 {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM history")
            .fetch_one(pool)
            .await
            .expect("count should succeed");
        if count >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("recorder never wrote {expected} history rows");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// A sweep in scheduler mode (ownerId param, no cookies) probes every
/// enabled project, answers with the database outcomes, and records the
/// full batch in the background.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_with_owner_id(pool: PgPool) {
    let (owner_id, _cookies) = signup(&pool, "sweep-user").await;

    let frontend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&frontend)
        .await;

    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&api)
        .await;

    let database = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!("2026-01-01")))
        .mount(&database)
        .await;

    insert_project(&pool, owner_id, "site", "frontend", Some(&frontend.uri()), None, true).await;
    insert_project(&pool, owner_id, "svc", "api", Some(&api.uri()), None, true).await;
    let db_id =
        insert_project(&pool, owner_id, "store", "database", None, Some(&database.uri()), true)
            .await;
    // Disabled projects are left out of the sweep.
    insert_project(&pool, owner_id, "paused", "frontend", Some(&frontend.uri()), None, false)
        .await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/monitor/refresh?ownerId={owner_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The response carries only the database-category outcomes.
    let json = body_json(response).await;
    let outcomes = json["data"].as_array().expect("data must be an array");
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["project_id"], db_id);
    assert_eq!(outcomes[0]["status"], "Active");

    // All three enabled projects get recorded, the disabled one does not.
    wait_for_history(&pool, 3).await;
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM history")
        .fetch_one(&pool)
        .await
        .expect("count should succeed");
    assert_eq!(count, 3);
}

/// Cookie-authenticated sweeps work without an ownerId.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_with_cookies(pool: PgPool) {
    let (owner_id, cookies) = signup(&pool, "cookie-sweeper").await;

    let database = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!("2026-01-01")))
        .mount(&database)
        .await;
    insert_project(&pool, owner_id, "store", "database", None, Some(&database.uri()), true)
        .await;

    let response = post_with_cookies(
        common::build_test_app(pool.clone()),
        "/api/monitor/refresh",
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// A sweep with only a refresh cookie rotates the session and installs
/// the new cookie pair on the response.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_refreshes_stale_access(pool: PgPool) {
    let (_owner_id, cookies) = signup(&pool, "stale-sweeper").await;
    let refresh = cookies
        .split("refresh_token=")
        .nth(1)
        .expect("cookie header contains the refresh token")
        .to_string();

    let response = post_with_cookies(
        common::build_test_app(pool.clone()),
        "/api/monitor/refresh",
        &format!("refresh_token={refresh}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rotated = response_cookie(&response, "refresh_token")
        .expect("a rotated refresh cookie must be installed");
    assert_ne!(rotated, refresh);
    assert!(response_cookie(&response, "access_token").is_some());
}

/// No cookies and no ownerId is a 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_requires_identity(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/monitor/refresh",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
