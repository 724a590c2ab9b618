//! Envelope assertions
//!
//! Checks for the two body shapes the API produces.

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Assert a formatted error: status plus `{ success: false, error: true, message }`
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "success": false, "error": true, "message": message })
    );
}

/// Assert a success envelope and return its body
pub fn assert_success(response: &TestResponse, status: StatusCode, message: &str) -> Value {
    assert_eq!(response.status_code(), status);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], message);
    body
}
