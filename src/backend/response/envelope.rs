/**
 * Response Envelope
 *
 * Every successful handler and every explicit error reply goes through
 * [`Envelope`], so all bodies share one JSON shape:
 *
 * ```json
 * { "success": true,  "message": "...", "data":   { ... } }
 * { "success": false, "message": "...", "errors": [ ... ] }
 * ```
 *
 * `success` is always present. `message` is omitted when empty. `data` and
 * `errors` are omitted when there is nothing to attach, and at most one of
 * them appears.
 *
 * # Send Operations
 *
 * - [`Envelope::success`] - success body, payload under `data`
 * - [`Envelope::response`] - payload fields merged onto the top level;
 *   `success` follows the status (`< 400`)
 * - [`Envelope::error`] and the named wrappers - failure body, payload
 *   under `errors`
 *
 * The named wrappers carry a default message; chain
 * [`Envelope::with_message`] to replace it, e.g.
 * `Envelope::not_found().with_message("Task not found")`.
 *
 * A handler returns exactly one `Envelope`; axum writes it once.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

/// Payload accepted by the send operations
///
/// Resolved once when the envelope is built: plain text becomes the
/// top-level message, a structured payload may carry its own `message`
/// field, which is lifted out of the data.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Plain message string
    Text(String),
    /// Structured payload (object, array or scalar)
    Payload(Value),
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Payload(other),
        }
    }
}

impl From<Map<String, Value>> for Message {
    fn from(map: Map<String, Value>) -> Self {
        Self::Payload(Value::Object(map))
    }
}

impl From<Vec<Value>> for Message {
    fn from(items: Vec<Value>) -> Self {
        Self::Payload(Value::Array(items))
    }
}

impl Message {
    /// Split into the top-level message and the remaining data
    fn resolve(self) -> (Option<String>, Option<Value>) {
        match self {
            Self::Text(text) => (non_empty(text), None),
            Self::Payload(Value::Object(mut map)) => {
                let message = map.remove("message").and_then(message_text);
                (message, Some(Value::Object(map)))
            }
            Self::Payload(other) => (None, Some(other)),
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn message_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => non_empty(text),
        other => Some(other.to_string()),
    }
}

/// True for a non-empty object or a non-empty array
pub fn has_attachable_data(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Pick the value to place under `key`
///
/// A remainder that consists solely of `key` is unwrapped so callers can
/// write `{ "message": ..., "errors": [...] }` without double nesting.
fn attachment(rest: Option<Value>, key: &str) -> Option<Value> {
    let value = match rest? {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(key) => map.remove(key)?,
        other => other,
    };
    has_attachable_data(&value).then_some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Success,
    Response,
    Error,
}

/// A finalized JSON reply
///
/// # Example
///
/// ```rust
/// use axum::http::StatusCode;
/// use serde_json::json;
/// use tasks_api::backend::response::Envelope;
///
/// let reply = Envelope::response(json!({ "message": "Task created successfully", "task": { "id": 1 } }))
///     .status(StatusCode::CREATED);
///
/// assert_eq!(reply.status_code(), StatusCode::CREATED);
/// assert_eq!(
///     reply.body(),
///     json!({ "success": true, "message": "Task created successfully", "task": { "id": 1 } })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Envelope {
    shape: Shape,
    status: StatusCode,
    message: Option<String>,
    rest: Option<Value>,
}

impl Envelope {
    fn build(shape: Shape, payload: Message, status: StatusCode) -> Self {
        let (message, rest) = payload.resolve();
        Self {
            shape,
            status,
            message,
            rest,
        }
    }

    /// Success reply (200); structured payload goes under `data`
    pub fn success(payload: impl Into<Message>) -> Self {
        Self::build(Shape::Success, payload.into(), StatusCode::OK)
    }

    /// Generic reply (200); payload fields are merged onto the top level
    ///
    /// This is the path resource handlers use for `{ task }` and
    /// `{ tasks, count }`.
    pub fn response(data: impl Into<Message>) -> Self {
        Self::build(Shape::Response, data.into(), StatusCode::OK)
    }

    /// Error reply (400); structured payload goes under `errors`
    pub fn error(payload: impl Into<Message>) -> Self {
        Self::build(Shape::Error, payload.into(), StatusCode::BAD_REQUEST)
    }

    /// 400 "Bad Request"
    pub fn bad_request() -> Self {
        Self::error("Bad Request")
    }

    /// 403 "Forbidden"
    pub fn forbidden() -> Self {
        Self::error("Forbidden").status(StatusCode::FORBIDDEN)
    }

    /// 404 "Not Found"
    pub fn not_found() -> Self {
        Self::error("Not Found").status(StatusCode::NOT_FOUND)
    }

    /// 409 "Already exists"
    pub fn already_exists() -> Self {
        Self::error("Already exists").status(StatusCode::CONFLICT)
    }

    /// 401 "Unauthorized Access"
    pub fn unauthorized() -> Self {
        Self::error("Unauthorized Access").status(StatusCode::UNAUTHORIZED)
    }

    /// 500 "Internal Server Error"
    pub fn internal_error() -> Self {
        Self::error("Internal Server Error").status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Replace the top-level message, keeping status and payload
    ///
    /// An empty message removes the field from the body.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = non_empty(message.into());
        self
    }

    /// Override the HTTP status
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// HTTP status that will be sent
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Top-level message, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Value of the `success` field
    pub fn is_success(&self) -> bool {
        match self.shape {
            Shape::Success => true,
            Shape::Response => self.status.as_u16() < 400,
            Shape::Error => false,
        }
    }

    /// JSON body that will be sent
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(self.is_success()));
        if let Some(message) = &self.message {
            body.insert("message".to_string(), Value::String(message.clone()));
        }

        match self.shape {
            Shape::Success => {
                if let Some(data) = attachment(self.rest.clone(), "data") {
                    body.insert("data".to_string(), data);
                }
            }
            Shape::Error => {
                if let Some(errors) = attachment(self.rest.clone(), "errors") {
                    body.insert("errors".to_string(), errors);
                }
            }
            Shape::Response => match self.rest.clone() {
                Some(Value::Object(fields)) => {
                    for (key, value) in fields {
                        if key != "success" {
                            body.insert(key, value);
                        }
                    }
                }
                Some(other) if has_attachable_data(&other) => {
                    body.insert("data".to_string(), other);
                }
                _ => {}
            },
        }

        Value::Object(body)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}
