/**
 * API Error Types
 *
 * This module defines the closed set of application errors raised by
 * handlers and by the storage classification path.
 *
 * # Error Kinds
 *
 * | Kind | Default status | Raised when |
 * |---|---|---|
 * | `ApplicationError` | 400 | invalid input, business-rule violation |
 * | `NotFoundError` | 404 | requested resource absent |
 * | `ResourceError` | 404 | a named lookup came back empty |
 * | `InternalServerError` | 500 | unexpected lower-level failure |
 *
 * Every variant shares the same `{ kind, message, status, data }` shape.
 * Construction never fails; the status is always overridable with
 * [`ApiError::with_status`].
 */

use axum::http::StatusCode;
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// Discriminant of an [`ApiError`]
///
/// The names double as the `name` field of the serialized error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ApplicationError,
    NotFoundError,
    ResourceError,
    InternalServerError,
}

impl ErrorKind {
    /// Serialized name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationError => "ApplicationError",
            Self::NotFoundError => "NotFoundError",
            Self::ResourceError => "ResourceError",
            Self::InternalServerError => "InternalServerError",
        }
    }

    /// Status used when the caller does not override it
    pub fn default_status(&self) -> StatusCode {
        match self {
            Self::ApplicationError => StatusCode::BAD_REQUEST,
            Self::NotFoundError | Self::ResourceError => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message substituted for a blank one
    fn fallback_message(&self) -> &'static str {
        match self {
            Self::ApplicationError => "Bad Request",
            Self::NotFoundError | Self::ResourceError => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error propagated from handlers to the error formatter
///
/// # Usage
///
/// ```rust
/// use tasks_api::backend::error::ApiError;
/// use axum::http::StatusCode;
///
/// let err = ApiError::application("Title cannot be empty");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = ApiError::not_found("Task not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
///
/// let err = ApiError::application("Failed to retrieve tasks")
///     .with_status(StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(err.status_code().as_u16(), 500);
/// ```
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Generic application error (invalid input, rule violation)
    #[error("{message}")]
    Application {
        /// Human-readable error message
        message: String,
        /// HTTP status code for this error
        status: StatusCode,
    },

    /// Requested resource is absent
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
        /// HTTP status code for this error
        status: StatusCode,
    },

    /// A named lookup came back empty
    ///
    /// Carries the resource name and the query that was used so callers
    /// can report what was searched for.
    #[error("{message}")]
    Resource {
        /// Human-readable error message
        message: String,
        /// HTTP status code for this error
        status: StatusCode,
        /// Name of the resource that was looked up
        resource: String,
        /// Lookup query, as supplied by the caller
        query: Value,
    },

    /// Unexpected failure wrapping a lower-level error's message
    #[error("{message}")]
    InternalServer {
        /// Human-readable error message
        message: String,
        /// HTTP status code for this error
        status: StatusCode,
    },
}

/// Replace a blank message with the kind's fallback
fn normalize(kind: ErrorKind, message: String) -> String {
    if message.trim().is_empty() {
        kind.fallback_message().to_string()
    } else {
        message
    }
}

impl ApiError {
    /// Create an application error (400 by default)
    pub fn application(message: impl Into<String>) -> Self {
        let kind = ErrorKind::ApplicationError;
        Self::Application {
            message: normalize(kind, message.into()),
            status: kind.default_status(),
        }
    }

    /// Create an application error from several messages, joined with `", "`
    ///
    /// ```rust
    /// use tasks_api::backend::error::ApiError;
    ///
    /// let err = ApiError::application_list(["title is required", "completed must be boolean"]);
    /// assert_eq!(err.message(), "title is required, completed must be boolean");
    /// ```
    pub fn application_list<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = messages
            .into_iter()
            .map(|m| m.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::application(joined)
    }

    /// Create a not-found error (404 by default)
    pub fn not_found(message: impl Into<String>) -> Self {
        let kind = ErrorKind::NotFoundError;
        Self::NotFound {
            message: normalize(kind, message.into()),
            status: kind.default_status(),
        }
    }

    /// Create a resource lookup error (404 by default)
    pub fn resource(resource: impl Into<String>, query: impl Into<Value>) -> Self {
        let resource = resource.into();
        Self::Resource {
            message: format!("The resource {} was not found.", resource),
            status: ErrorKind::ResourceError.default_status(),
            resource,
            query: query.into(),
        }
    }

    /// Wrap a lower-level error as an internal server error (500 by default)
    pub fn internal(source: impl fmt::Display) -> Self {
        let kind = ErrorKind::InternalServerError;
        Self::InternalServer {
            message: normalize(kind, source.to_string()),
            status: kind.default_status(),
        }
    }

    /// Override the HTTP status
    pub fn with_status(mut self, new_status: StatusCode) -> Self {
        match &mut self {
            Self::Application { status, .. }
            | Self::NotFound { status, .. }
            | Self::Resource { status, .. }
            | Self::InternalServer { status, .. } => *status = new_status,
        }
        self
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Application { .. } => ErrorKind::ApplicationError,
            Self::NotFound { .. } => ErrorKind::NotFoundError,
            Self::Resource { .. } => ErrorKind::ResourceError,
            Self::InternalServer { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Serialized name of this error's kind
    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application { status, .. }
            | Self::NotFound { status, .. }
            | Self::Resource { status, .. }
            | Self::InternalServer { status, .. } => *status,
        }
    }

    /// Error message, never empty
    pub fn message(&self) -> &str {
        match self {
            Self::Application { message, .. }
            | Self::NotFound { message, .. }
            | Self::Resource { message, .. }
            | Self::InternalServer { message, .. } => message,
        }
    }

    /// Structured payload, present only for resource errors
    pub fn data(&self) -> Option<Value> {
        match self {
            Self::Resource { resource, query, .. } => Some(json!({
                "resource": resource,
                "query": query,
            })),
            _ => None,
        }
    }

    /// Serialize as `{ name, statusCode, message, data? }`
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "name": self.name(),
            "statusCode": self.status_code().as_u16(),
            "message": self.message(),
        });
        if let (Some(data), Some(map)) = (self.data(), body.as_object_mut()) {
            map.insert("data".to_string(), data);
        }
        body
    }
}
