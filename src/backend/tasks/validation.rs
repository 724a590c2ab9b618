//! Request validation for task handlers
//!
//! Bodies arrive as raw JSON so that presence, `null` and type errors can be
//! told apart and reported per field. Everything here runs before the store
//! is touched.

use serde_json::{Map, Value};

use crate::backend::error::ApiError;
use crate::shared::task::{NewTask, TaskPatch, TITLE_MAX_LEN};

/// Parse the `:task_id` path segment
pub fn parse_task_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::application("Invalid task ID provided"))
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::application("Request body must be a JSON object"))
}

/// Check a present title; `blank_message` differs between create and update
fn validate_title(value: &Value, blank_message: &str) -> Result<String, ApiError> {
    let title = match value {
        Value::Null => return Err(ApiError::application(blank_message)),
        Value::String(title) => title,
        _ => return Err(ApiError::application("Title must be a string value")),
    };
    if title.trim().is_empty() {
        return Err(ApiError::application(blank_message));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ApiError::application(format!(
            "Title cannot exceed {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(title.trim().to_string())
}

fn validate_completed(value: &Value) -> Result<bool, ApiError> {
    value
        .as_bool()
        .ok_or_else(|| ApiError::application("Completed field must be a boolean value"))
}

fn validate_description(value: &Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        _ => Err(ApiError::application("Description must be a string value")),
    }
}

/// Validate a create body: `{ title, description?, completed? }`
pub fn validate_new_task(body: &Value) -> Result<NewTask, ApiError> {
    let fields = as_object(body)?;

    let title = match fields.get("title") {
        Some(value) => validate_title(value, "Title is required and cannot be empty")?,
        None => return Err(ApiError::application("Title is required and cannot be empty")),
    };

    let completed = match fields.get("completed") {
        Some(value) => validate_completed(value)?,
        None => false,
    };

    // An empty description is stored as NULL on create
    let description = match fields.get("description") {
        Some(value) => validate_description(value)?.filter(|text| !text.is_empty()),
        None => None,
    };

    Ok(NewTask {
        title,
        description,
        completed,
    })
}

/// Validate an update body; only present fields end up in the patch
pub fn validate_task_patch(body: &Value) -> Result<TaskPatch, ApiError> {
    let fields = as_object(body)?;

    let patch = TaskPatch {
        title: fields
            .get("title")
            .map(|value| validate_title(value, "Title cannot be empty"))
            .transpose()?,
        completed: fields.get("completed").map(validate_completed).transpose()?,
        description: fields
            .get("description")
            .map(validate_description)
            .transpose()?,
    };

    if patch.is_empty() {
        return Err(ApiError::application("No valid fields provided for update"));
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    fn message_of<T: std::fmt::Debug>(result: Result<T, ApiError>) -> String {
        let error = result.unwrap_err();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        error.message().to_string()
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert_eq!(message_of(parse_task_id("abc")), "Invalid task ID provided");
        assert_eq!(message_of(parse_task_id("")), "Invalid task ID provided");
        assert_eq!(message_of(parse_task_id("99999999999")), "Invalid task ID provided");
    }

    #[test]
    fn test_new_task_defaults() {
        let task = validate_new_task(&json!({ "title": "  Buy milk  " })).unwrap();
        assert_eq!(
            task,
            NewTask {
                title: "Buy milk".to_string(),
                description: None,
                completed: false,
            }
        );
    }

    #[test]
    fn test_new_task_title_rules() {
        let blank = "Title is required and cannot be empty";
        assert_eq!(message_of(validate_new_task(&json!({}))), blank);
        assert_eq!(message_of(validate_new_task(&json!({ "title": "" }))), blank);
        assert_eq!(message_of(validate_new_task(&json!({ "title": "   " }))), blank);
        assert_eq!(message_of(validate_new_task(&json!({ "title": null }))), blank);
        assert_eq!(
            message_of(validate_new_task(&json!({ "title": 7 }))),
            "Title must be a string value"
        );

        let long = "x".repeat(256);
        assert_eq!(
            message_of(validate_new_task(&json!({ "title": long }))),
            "Title cannot exceed 255 characters"
        );
        assert!(validate_new_task(&json!({ "title": "x".repeat(255) })).is_ok());
    }

    #[test]
    fn test_new_task_completed_must_be_boolean() {
        let message = message_of(validate_new_task(&json!({ "title": "t", "completed": "yes" })));
        assert_eq!(message, "Completed field must be a boolean value");
        let message = message_of(validate_new_task(&json!({ "title": "t", "completed": null })));
        assert_eq!(message, "Completed field must be a boolean value");
    }

    #[test]
    fn test_new_task_description() {
        let task = validate_new_task(&json!({ "title": "t", "description": "" })).unwrap();
        assert_eq!(task.description, None);
        let task = validate_new_task(&json!({ "title": "t", "description": "d" })).unwrap();
        assert_eq!(task.description.as_deref(), Some("d"));
        assert_eq!(
            message_of(validate_new_task(&json!({ "title": "t", "description": 1 }))),
            "Description must be a string value"
        );
    }

    #[test]
    fn test_body_must_be_object() {
        assert_eq!(
            message_of(validate_new_task(&json!(["title"]))),
            "Request body must be a JSON object"
        );
        assert_eq!(
            message_of(validate_task_patch(&json!("title"))),
            "Request body must be a JSON object"
        );
    }

    #[test]
    fn test_patch_only_present_fields() {
        let patch = validate_task_patch(&json!({ "completed": true })).unwrap();
        assert_eq!(
            patch,
            TaskPatch {
                completed: Some(true),
                ..Default::default()
            }
        );

        let patch = validate_task_patch(&json!({ "description": null })).unwrap();
        assert_eq!(patch.description, Some(None));
    }

    #[test]
    fn test_patch_rejects_empty_and_unknown() {
        let none = "No valid fields provided for update";
        assert_eq!(message_of(validate_task_patch(&json!({}))), none);
        assert_eq!(message_of(validate_task_patch(&json!({ "priority": 3 }))), none);
    }

    #[test]
    fn test_patch_title_rules() {
        assert_eq!(
            message_of(validate_task_patch(&json!({ "title": " " }))),
            "Title cannot be empty"
        );
        assert_eq!(
            message_of(validate_task_patch(&json!({ "title": null }))),
            "Title cannot be empty"
        );
        let patch = validate_task_patch(&json!({ "title": " New " })).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
    }
}
