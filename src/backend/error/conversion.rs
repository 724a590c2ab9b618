/**
 * Error Conversion
 *
 * This module provides conversion implementations for API errors:
 *
 * - `IntoResponse` for [`ApiError`], which forwards the error to the
 *   centralized formatter instead of rendering a body itself
 * - classification of low-level storage failures into the taxonomy
 *
 * # Forwarding
 *
 * Returning `Err(ApiError)` from a handler produces an empty response with
 * the error's status and a [`ForwardedError`] extension. The
 * `error_formatter` middleware, installed after all routes, is the only
 * place that turns it into JSON.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::ApiError;
use crate::backend::middleware::boundary::ForwardedError;
use crate::backend::tasks::store::{StoreError, INVALID_AUTHORIZATION, UNDEFINED_TABLE};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status_code().into_response();
        response.extensions_mut().insert(ForwardedError(self));
        response
    }
}

impl ApiError {
    /// Classify a storage failure raised while performing `action`
    ///
    /// Known SQLSTATE codes and refused connections get a descriptive
    /// message; everything else becomes a generic 500 carrying the
    /// underlying message.
    ///
    /// ```rust
    /// use tasks_api::backend::error::ApiError;
    /// use tasks_api::backend::tasks::store::StoreError;
    ///
    /// let err = ApiError::from_store("create task", StoreError::Other("boom".into()));
    /// assert_eq!(err.message(), "Failed to create task: boom");
    /// assert_eq!(err.status_code().as_u16(), 500);
    /// ```
    pub fn from_store(action: &str, err: StoreError) -> Self {
        tracing::error!(
            action,
            code = err.code().unwrap_or("-"),
            detail = %err,
            "Storage operation failed"
        );

        let message = match (&err, err.code()) {
            (_, Some(UNDEFINED_TABLE)) => {
                "Database table does not exist. Please ensure the database schema is properly initialized."
                    .to_string()
            }
            (_, Some(INVALID_AUTHORIZATION)) => {
                "Database authentication failed. Please check your database credentials.".to_string()
            }
            (StoreError::ConnectionRefused(_), _) => {
                "Cannot connect to database. Please check your database connection settings."
                    .to_string()
            }
            _ => format!("Failed to {}: {}", action, err),
        };

        ApiError::application(message).with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
