//! Task API integration tests
//!
//! CRUD behaviour through the full router over the in-memory store.

mod common;

use axum::http::StatusCode;
use common::{assert_error, assert_success, memory_server};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const TASKS: &str = "/api/v1/tasks";

async fn create(server: &axum_test::TestServer, body: Value) -> Value {
    let response = server.post(TASKS).json(&body).await;
    let body = assert_success(&response, StatusCode::CREATED, "Task created successfully");
    body["task"].clone()
}

#[tokio::test]
async fn test_root_reports_version() {
    let server = memory_server();
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "message": "API v1", "version": "v1" }));
}

#[tokio::test]
async fn test_create_returns_task() {
    let server = memory_server();
    let task = create(
        &server,
        json!({ "title": "  Write docs ", "description": "for the API" }),
    )
    .await;

    assert_eq!(task["id"], 1);
    assert_eq!(task["title"], "Write docs");
    assert_eq!(task["description"], "for the API");
    assert_eq!(task["completed"], false);
    assert!(task["created_at"].is_string());
    assert_eq!(task["created_at"], task["updated_at"]);
}

#[tokio::test]
async fn test_create_body_shape() {
    let server = memory_server();
    let response = server.post(TASKS).json(&json!({ "title": "Shape" })).await;
    let body: Value = response.json();
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["success", "message", "task"]);
}

#[tokio::test]
async fn test_list_empty() {
    let server = memory_server();
    let response = server.get(TASKS).await;
    let body = assert_success(&response, StatusCode::OK, "Tasks retrieved successfully");
    assert_eq!(body["tasks"], json!([]));
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_list_newest_first_with_count() {
    let server = memory_server();
    for title in ["first", "second", "third"] {
        create(&server, json!({ "title": title })).await;
    }

    let response = server.get(TASKS).await;
    let body = assert_success(&response, StatusCode::OK, "Tasks retrieved successfully");
    assert_eq!(body["count"], 3);
    let titles: Vec<&str> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_get_round_trip() {
    let server = memory_server();
    let created = create(&server, json!({ "title": "Round trip", "completed": true })).await;

    let response = server.get(&format!("{}/{}", TASKS, created["id"])).await;
    let body = assert_success(&response, StatusCode::OK, "Task retrieved successfully");
    assert_eq!(body["task"], created);
}

#[tokio::test]
async fn test_get_missing_task() {
    let server = memory_server();
    let response = server.get(&format!("{}/99999", TASKS)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Task not found");
}

#[tokio::test]
async fn test_invalid_id_is_rejected() {
    let server = memory_server();
    for path in ["abc", "1.5", "99999999999"] {
        let response = server.get(&format!("{}/{}", TASKS, path)).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "Invalid task ID provided");
    }
    let response = server.delete(&format!("{}/abc", TASKS)).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Invalid task ID provided");
}

#[tokio::test]
async fn test_update_only_touches_present_fields() {
    let server = memory_server();
    let created = create(&server, json!({ "title": "Keep me", "description": "d" })).await;

    let response = server
        .put(&format!("{}/{}", TASKS, created["id"]))
        .json(&json!({ "completed": true }))
        .await;
    let body = assert_success(&response, StatusCode::OK, "Task updated successfully");
    let task = &body["task"];
    assert_eq!(task["title"], "Keep me");
    assert_eq!(task["description"], "d");
    assert_eq!(task["completed"], true);
    assert_eq!(task["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_null_description_clears_it() {
    let server = memory_server();
    let created = create(&server, json!({ "title": "t", "description": "d" })).await;

    let response = server
        .put(&format!("{}/{}", TASKS, created["id"]))
        .json(&json!({ "description": null }))
        .await;
    let body = assert_success(&response, StatusCode::OK, "Task updated successfully");
    assert_eq!(body["task"]["description"], Value::Null);
}

#[tokio::test]
async fn test_update_missing_task() {
    let server = memory_server();
    let response = server
        .put(&format!("{}/99999", TASKS))
        .json(&json!({ "completed": true }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "Task not found");
}

#[tokio::test]
async fn test_update_validation_runs_before_lookup() {
    let server = memory_server();
    let response = server
        .put(&format!("{}/99999", TASKS))
        .json(&json!({}))
        .await;
    assert_error(
        &response,
        StatusCode::BAD_REQUEST,
        "No valid fields provided for update",
    );
}

#[tokio::test]
async fn test_update_blank_title() {
    let server = memory_server();
    let created = create(&server, json!({ "title": "t" })).await;
    let response = server
        .put(&format!("{}/{}", TASKS, created["id"]))
        .json(&json!({ "title": "   " }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Title cannot be empty");
}

#[tokio::test]
async fn test_delete_is_not_repeatable() {
    let server = memory_server();
    let created = create(&server, json!({ "title": "Gone soon" })).await;
    let path = format!("{}/{}", TASKS, created["id"]);

    let response = server.delete(&path).await;
    let body = assert_success(&response, StatusCode::OK, "Task deleted successfully");
    assert_eq!(body["task"], created);

    let response = server.delete(&path).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Task not found");

    let response = server.get(&path).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Task not found");
}

#[tokio::test]
async fn test_create_validation_messages() {
    let server = memory_server();
    let cases = [
        (json!({}), "Title is required and cannot be empty"),
        (json!({ "title": "" }), "Title is required and cannot be empty"),
        (json!({ "title": "x".repeat(256) }), "Title cannot exceed 255 characters"),
        (
            json!({ "title": "t", "completed": "yes" }),
            "Completed field must be a boolean value",
        ),
        (
            json!({ "title": "t", "description": 5 }),
            "Description must be a string value",
        ),
        (json!([1, 2]), "Request body must be a JSON object"),
    ];

    for (body, message) in cases {
        let response = server.post(TASKS).json(&body).await;
        assert_error(&response, StatusCode::BAD_REQUEST, message);
    }

    // Nothing was stored
    let body: Value = server.get(TASKS).await.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_title_length_counts_characters() {
    let server = memory_server();
    let task = create(&server, json!({ "title": "é".repeat(255) })).await;
    assert_eq!(task["title"].as_str().unwrap().chars().count(), 255);
}
