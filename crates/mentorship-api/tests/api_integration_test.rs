//! Integration tests for the roster endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mentorship_api::{models::*, ApiServer, ApiServerConfig};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot` method

/// Helper to create an in-memory database with migrations applied
async fn create_test_db() -> DatabaseConnection {
    let db = mentorship_db::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    mentorship_db::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Helper to create a router backed by a fresh database
async fn create_test_app() -> Router {
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        enable_cors: false,
        cors_origins: None,
    };

    create_test_app_with(config).await.0
}

/// Helper returning the router together with its database handle
async fn create_test_app_with(config: ApiServerConfig) -> (Router, DatabaseConnection) {
    let db = create_test_db().await;
    let router = ApiServer::new(config, db.clone()).build_router();
    (router, db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_mentor(app: &Router, fullname: &str, specialization: &str) -> i32 {
    let (status, body) = send(
        app,
        "POST",
        "/api/mentor",
        Some(json!({"fullname": fullname, "specialization": specialization})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: CreatedResponse = serde_json::from_value(body).unwrap();
    created.id
}

async fn create_team(app: &Router, mentor_id: i32, project: &str, members: &[&str]) -> i32 {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/mentor/{}/team", mentor_id),
        Some(json!({"project": project, "specialization": "Math", "members": members})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    body["id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn test_end_to_end_mentor_and_team_lifecycle() {
    let app = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/mentor",
        Some(json!({"fullname": "Alice Smith", "specialization": "Math"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ok");
    let mentor_id = body["id"].as_i64().expect("integer id");

    let (status, body) = send(&app, "GET", &format!("/api/mentor/{}", mentor_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": mentor_id, "fullname": "Alice Smith", "specialization": "Math", "teams": []})
    );

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/mentor/{}/team", mentor_id),
        Some(json!({"project": "Robotics", "specialization": "Math", "members": ["Bob", "Carol"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let team_id = body["id"].as_i64().expect("integer id");

    let team_uri = format!("/api/mentor/{}/team/{}", mentor_id, team_id);
    let (status, body) = send(&app, "GET", &team_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": team_id, "project": "Robotics", "specialization": "Math", "members": ["Bob", "Carol"]})
    );

    let (status, body) = send(&app, "DELETE", &team_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ok"}));

    let (status, body) = send(&app, "GET", &team_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Not Found"}));
}

#[tokio::test]
async fn test_list_mentor_ids() {
    let app = create_test_app().await;
    let first = create_mentor(&app, "Alice Smith", "Math").await;
    let second = create_mentor(&app, "Dave Jones", "Art").await;

    let (status, body) = send(&app, "GET", "/api/mentor", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([first, second]));
}

#[tokio::test]
async fn test_get_missing_mentor_returns_404() {
    let app = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/mentor/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_non_numeric_id_returns_404() {
    let app = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/mentor/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_create_mentor_with_long_fullname_fails() {
    let app = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/mentor",
        Some(json!({"fullname": "a".repeat(65), "specialization": "Math"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.code.as_deref(), Some("VALIDATION_ERROR"));
    assert!(error.message.contains("fullname"));

    let (_, ids) = send(&app, "GET", "/api/mentor", None).await;
    assert_eq!(ids, json!([]));
}

#[tokio::test]
async fn test_create_mentor_missing_field_fails() {
    let app = create_test_app().await;

    let (status, body) = send(&app, "POST", "/api/mentor", Some(json!({"fullname": "Alice"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "specialization is required");
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let app = create_test_app().await;

    let request = Request::builder()
        .uri("/api/mentor")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error.code.as_deref(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_get_mentor_nests_teams() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;
    let team_id = create_team(&app, mentor_id, "Robotics", &["Bob"]).await;

    let (_, body) = send(&app, "GET", &format!("/api/mentor/{}", mentor_id), None).await;
    let mentor: MentorDetail = serde_json::from_value(body).unwrap();
    assert_eq!(
        mentor.teams,
        vec![TeamSummary {
            id: team_id,
            project: "Robotics".to_string(),
            specialization: "Math".to_string(),
            mentor_id,
        }]
    );

    let (_, ids) = send(&app, "GET", &format!("/api/mentor/{}/team", mentor_id), None).await;
    assert_eq!(ids, json!([team_id]));
}

#[tokio::test]
async fn test_create_team_for_missing_mentor_returns_404() {
    let app = create_test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/mentor/42/team",
        Some(json!({"project": "Robotics", "specialization": "Math", "members": []})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_mentor_propagates_to_teams() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;
    let team_id = create_team(&app, mentor_id, "Robotics", &["Bob"]).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/mentor/{}", mentor_id),
        Some(json!({"specialization": "Physics"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ok"}));

    let (_, mentor) = send(&app, "GET", &format!("/api/mentor/{}", mentor_id), None).await;
    assert_eq!(mentor["fullname"], "Alice Smith");
    assert_eq!(mentor["specialization"], "Physics");

    let (_, team) = send(
        &app,
        "GET",
        &format!("/api/mentor/{}/team/{}", mentor_id, team_id),
        None,
    )
    .await;
    assert_eq!(team["specialization"], "Physics");
    assert_eq!(team["project"], "Robotics");
    assert_eq!(team["members"], json!(["Bob"]));
}

#[tokio::test]
async fn test_update_missing_mentor_returns_404() {
    let app = create_test_app().await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/mentor/5",
        Some(json!({"fullname": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_update_team_keeps_members() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;
    let team_id = create_team(&app, mentor_id, "Robotics", &["Bob", "Carol"]).await;
    let team_uri = format!("/api/mentor/{}/team/{}", mentor_id, team_id);

    let (status, _) = send(
        &app,
        "PATCH",
        &team_uri,
        Some(json!({"project": "Drones", "members": ["ignored"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, team) = send(&app, "GET", &team_uri, None).await;
    assert_eq!(team["project"], "Drones");
    assert_eq!(team["members"], json!(["Bob", "Carol"]));
}

#[tokio::test]
async fn test_replace_members() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;
    let team_id = create_team(&app, mentor_id, "Robotics", &["Bob", "Carol"]).await;
    let team_uri = format!("/api/mentor/{}/team/{}", mentor_id, team_id);

    let (status, body) = send(
        &app,
        "POST",
        &format!("{}/members", team_uri),
        Some(json!({"members": ["Erin", "Carol"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, team) = send(&app, "GET", &team_uri, None).await;
    // Ordered by member creation: Carol predates Erin
    assert_eq!(team["members"], json!(["Carol", "Erin"]));
}

#[tokio::test]
async fn test_replace_members_of_missing_team_returns_404() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/mentor/{}/team/77/members", mentor_id),
        Some(json!({"members": ["Bob"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shared_member_across_teams() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;
    let first = create_team(&app, mentor_id, "Robotics", &["Bob"]).await;
    let second = create_team(&app, mentor_id, "Chess", &["Bob", "Carol"]).await;

    for team_id in [first, second] {
        let (_, team) = send(
            &app,
            "GET",
            &format!("/api/mentor/{}/team/{}", mentor_id, team_id),
            None,
        )
        .await;
        assert_eq!(team["members"][0], "Bob");
    }
}

#[tokio::test]
async fn test_delete_mentor_removes_its_teams() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;
    let team_id = create_team(&app, mentor_id, "Robotics", &["Bob"]).await;

    let (status, body) = send(&app, "DELETE", &format!("/api/mentor/{}", mentor_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ok"}));

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/mentor/{}/team/{}", mentor_id, team_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again is still Ok
    let (status, _) = send(&app, "DELETE", &format!("/api/mentor/{}", mentor_id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let app = create_test_app().await;

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_blank_member_name_is_rejected() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/mentor/{}/team", mentor_id),
        Some(json!({"project": "Robotics", "specialization": "Math", "members": ["", "Bob"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "members must not be empty");

    // Nothing was written
    let (_, teams) = send(&app, "GET", &format!("/api/mentor/{}/team", mentor_id), None).await;
    assert_eq!(teams, json!([]));

    let (status, body) = send(
        &app,
        "POST",
        "/api/mentor",
        Some(json!({"fullname": "", "specialization": "Math"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "fullname must not be empty");
}

#[tokio::test]
async fn test_update_missing_team_returns_404() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/mentor/{}/team/9999", mentor_id),
        Some(json!({"project": "Rovers"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_team_under_other_mentor_is_absent() {
    let app = create_test_app().await;
    let owner = create_mentor(&app, "Alice Smith", "Math").await;
    let other = create_mentor(&app, "Bob Jones", "Bio").await;
    let team_id = create_team(&app, owner, "Robotics", &["Bob", "Carol"]).await;

    let foreign = format!("/api/mentor/{}/team/{}", other, team_id);

    let (status, _) = send(&app, "GET", &foreign, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PATCH", &foreign, Some(json!({"project": "Hijacked"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        &format!("{}/members", foreign),
        Some(json!({"members": ["Mallory"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Delete through the wrong mentor is a no-op
    let (status, body) = send(&app, "DELETE", &foreign, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ok"}));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/mentor/{}/team/{}", owner, team_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"], "Robotics");
    assert_eq!(body["members"], json!(["Bob", "Carol"]));
}

#[tokio::test]
async fn test_delete_absent_entities_is_ok() {
    let app = create_test_app().await;
    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/mentor/{}/team/9999", mentor_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ok"}));

    let (status, body) = send(&app, "DELETE", "/api/mentor/9999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ok"}));
}

#[tokio::test]
async fn test_constraint_violation_carries_code() {
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        enable_cors: false,
        cors_origins: None,
    };
    let (app, db) = create_test_app_with(config).await;

    // A store-level rule the request validation does not know about
    db.execute_unprepared("CREATE UNIQUE INDEX idx_teams_project ON teams (project)")
        .await
        .unwrap();

    let mentor_id = create_mentor(&app, "Alice Smith", "Math").await;
    create_team(&app, mentor_id, "Robotics", &[]).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/mentor/{}/team", mentor_id),
        Some(json!({"project": "Robotics", "specialization": "Math"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONSTRAINT_VIOLATION");
    assert_eq!(body["message"], "Request conflicts with existing data");
}

#[tokio::test]
async fn test_cors_allows_configured_origins_only() {
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        enable_cors: true,
        cors_origins: Some(vec!["https://mentors.example.com".to_string()]),
    };
    let (app, _db) = create_test_app_with(config).await;

    let request = |origin: &str| {
        Request::builder()
            .uri("/api/health")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(request("https://mentors.example.com"))
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://mentors.example.com"
    );

    // Localhost is only the default when no list is configured
    let response = app
        .oneshot(request("http://localhost:5173"))
        .await
        .unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
