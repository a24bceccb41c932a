use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use mergington_api::config::cors::CorsConfig;
use mergington_api::router::init_router;
use mergington_api::state::AppState;

pub fn setup_test_app(pool: SqlitePool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

/// Sends a body-less request (all endpoints take query-string inputs) and
/// returns the status plus parsed JSON body.
pub async fn send_request(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

#[allow(dead_code)]
pub async fn insert_activity(pool: &SqlitePool, name: &str, capacity: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO activities (name, description, schedule, capacity) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind("Test activity")
    .bind("Mondays, 3:00 PM - 4:00 PM")
    .bind(capacity)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn insert_student(pool: &SqlitePool, email: &str, role: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO students (email, name, grade, role) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(email)
    .bind("Test Student")
    .bind("10")
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn participant_count(pool: &SqlitePool, activity_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE activity_id = ?")
        .bind(activity_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn waitlist_emails(pool: &SqlitePool, activity_id: i64) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT s.email FROM waitlist w \
         JOIN students s ON s.id = w.student_id \
         WHERE w.activity_id = ? \
         ORDER BY w.position ASC",
    )
    .bind(activity_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn participant_emails(pool: &SqlitePool, activity_id: i64) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT s.email FROM participants p \
         JOIN students s ON s.id = p.student_id \
         WHERE p.activity_id = ? \
         ORDER BY p.id",
    )
    .bind(activity_id)
    .fetch_all(pool)
    .await
    .unwrap()
}
