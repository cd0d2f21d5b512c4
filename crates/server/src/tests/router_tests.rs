// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use farnsworth_domain::WorkshiftSettings;
use farnsworth_persistence::Persistence;
use serde_json::{Value, json};
use time::{Date, Duration, OffsetDateTime};
use tower::ServiceExt;

use crate::{AppState, bootstrap_superuser, build_router, session::USER_HEADER};

/// A router over a fresh database holding the superuser `admin`.
fn create_test_app() -> Router {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    bootstrap_superuser(&mut persistence, "admin", WorkshiftSettings::default())
        .expect("bootstrap superuser");
    build_router(AppState::new(persistence, WorkshiftSettings::default()))
}

/// Sends one request and decodes the JSON body.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    let request: Request<Body> = builder
        .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn resident(username: &str) -> Value {
    json!({
        "username": username,
        "first_name": "Test",
        "last_name": "Resident",
        "status": "resident",
    })
}

fn iso(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// A semester that started a week ago and runs for four more months.
fn running_semester() -> Value {
    let today: Date = OffsetDateTime::now_utc().date();
    json!({
        "season": "Fall",
        "year": today.year(),
        "rate_cents": 1000,
        "start_date": iso(today - Duration::days(7)),
        "end_date": iso(today + Duration::days(120)),
    })
}

/// Registers `alice` and `bob`, starts a semester and returns its primary
/// pool id.
async fn setup_house(app: &Router) -> i64 {
    for username in ["alice", "bob"] {
        let (status, _) = send(app, "POST", "/members", Some("admin"), Some(resident(username))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(app, "POST", "/semesters", Some("admin"), Some(running_semester())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, overview) = send(app, "GET", "/semesters/current", Some("admin"), None).await;
    assert_eq!(status, StatusCode::OK);
    overview["pools"][0]["pool_id"].as_i64().unwrap()
}

/// Creates a one-off shift three days from now and returns its id.
async fn create_one_off(app: &Router, pool_id: i64) -> i64 {
    let date: Date = OffsetDateTime::now_utc().date() + Duration::days(3);
    let (status, body) = send(
        app,
        "POST",
        "/instances",
        Some("admin"),
        Some(json!({
            "title": "Party cleanup",
            "pool_id": pool_id,
            "verify": "O",
            "start_time": "10:00",
            "end_time": "12:00",
            "date": iso(date),
            "workshifter_id": null,
            "hours": 2.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["result"]["instance_id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_missing_user_header_is_unauthenticated() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/members", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authentication_failed");
}

#[tokio::test]
async fn test_unknown_user_is_unauthenticated() {
    let app: Router = create_test_app();

    let (status, _) = send(&app, "GET", "/whoami", Some("nobody"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_whoami_returns_bootstrap_superuser() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/whoami", Some("admin"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "admin");
    assert_eq!(body["is_superuser"], true);
}

#[tokio::test]
async fn test_bootstrap_superuser_is_idempotent() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    bootstrap_superuser(&mut persistence, "admin", WorkshiftSettings::default()).unwrap();
    bootstrap_superuser(&mut persistence, "admin", WorkshiftSettings::default()).unwrap();
    let app: Router = build_router(AppState::new(persistence, WorkshiftSettings::default()));

    let (status, body) = send(&app, "GET", "/members", Some("admin"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_member_reports_audited_action() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "POST", "/members", Some("admin"), Some(resident("alice"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["action"], "RegisterMember");
    assert_eq!(body["result"]["username"], "alice");
}

#[tokio::test]
async fn test_invalid_input_names_the_field() {
    let app: Router = create_test_app();
    let mut request: Value = resident("alice");
    request["status"] = json!("tenant");

    let (status, body) = send(&app, "POST", "/members", Some("admin"), Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["field"], "status");
}

#[tokio::test]
async fn test_plain_member_cannot_start_semester() {
    let app: Router = create_test_app();
    send(&app, "POST", "/members", Some("admin"), Some(resident("alice"))).await;

    let (status, body) = send(&app, "POST", "/semesters", Some("alice"), Some(running_semester())).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_current_semester_missing_is_not_found() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/semesters/current", Some("admin"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_start_semester_creates_primary_pool() {
    let app: Router = create_test_app();
    setup_house(&app).await;

    let (status, overview) = send(&app, "GET", "/semesters/current", Some("bob"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["pools"].as_array().unwrap().len(), 1);
    assert_eq!(overview["pools"][0]["title"], "Regular Workshift");
    assert_eq!(overview["days_elapsed"], 7);
    assert_eq!(overview["capabilities"]["can_manage"], false);
}

#[tokio::test]
async fn test_sign_in_then_second_sign_in_conflicts() {
    let app: Router = create_test_app();
    let pool_id: i64 = setup_house(&app).await;
    let instance_id: i64 = create_one_off(&app, pool_id).await;
    let uri: String = format!("/instances/{instance_id}/sign_in");

    let (status, body) = send(&app, "POST", &uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["result"]["state"], "assigned");

    let (status, body) = send(&app, "POST", &uri, Some("bob"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "domain_rule_violation");
}

#[tokio::test]
async fn test_instance_view_reports_capabilities_per_caller() {
    let app: Router = create_test_app();
    let pool_id: i64 = setup_house(&app).await;
    let instance_id: i64 = create_one_off(&app, pool_id).await;
    send(
        &app,
        "POST",
        &format!("/instances/{instance_id}/sign_in"),
        Some("alice"),
        None,
    )
    .await;
    let uri: String = format!("/instances/{instance_id}");

    let (status, alice_view) = send(&app, "GET", &uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alice_view["capabilities"]["can_sign_out"], true);
    assert_eq!(alice_view["capabilities"]["can_verify"], false);

    let (_, bob_view) = send(&app, "GET", &uri, Some("bob"), None).await;
    assert_eq!(bob_view["capabilities"]["can_sign_in"], false);
    assert_eq!(bob_view["capabilities"]["can_edit"], false);
}

#[tokio::test]
async fn test_unknown_instance_is_not_found() {
    let app: Router = create_test_app();
    setup_house(&app).await;

    let (status, _) = send(&app, "GET", "/instances/9999", Some("alice"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fines_query_parameter_is_accepted() {
    let app: Router = create_test_app();
    setup_house(&app).await;
    let (_, overview) = send(&app, "GET", "/semesters/current", Some("admin"), None).await;
    let semester_id: i64 = overview["semester"]["semester_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/semesters/{semester_id}/fines?clear=true"),
        Some("admin"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_audit_log_requires_manager() {
    let app: Router = create_test_app();
    setup_house(&app).await;

    let (status, _) = send(&app, "GET", "/audit", Some("alice"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/audit", Some("admin"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.as_array().unwrap().is_empty());
}
