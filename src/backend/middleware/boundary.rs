/**
 * Handler Boundary
 *
 * Everything that can go wrong inside a handler ends up as a
 * [`ForwardedError`] on the response, where the error formatter picks it up:
 *
 * - `Err(ApiError)` returned from a handler (see `error::conversion`)
 * - a panic, caught by `CatchPanicLayer` and turned into a 500
 * - a body that fails to extract, via [`JsonBody`]
 * - a task id that fails to extract or parse, via [`TaskId`]
 *
 * Successful handlers have already produced their `Envelope`; the boundary
 * adds nothing to those responses.
 */

use std::any::Any;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::ApiError;
use crate::backend::tasks::validation::parse_task_id;

/// Error travelling from a handler to the error formatter
///
/// Stored in the response extensions; only the formatter renders it.
#[derive(Debug, Clone)]
pub struct ForwardedError(pub ApiError);

/// Convert a caught panic into a forwarded 500
///
/// The panic payload is logged server-side and never sent to the client.
pub fn forward_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else {
        "non-string panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    ApiError::internal("Internal Server Error").into_response()
}

/// JSON body extractor whose rejections join the error taxonomy
///
/// Malformed JSON, a missing `Content-Type` or an oversized body become an
/// `ApplicationError` with the rejection's status and message.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected request body");
                Err(ApiError::application(rejection.body_text()).with_status(rejection.status()))
            }
        }
    }
}

/// `{task_id}` path segment, parsed as a task id
///
/// Undecodable segments (e.g. `%FF`) and non-integer ids both become
/// 400 "Invalid task ID provided".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub i32);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(
                    status = %rejection.status(),
                    "Rejected task id: {}",
                    rejection.body_text()
                );
                ApiError::application("Invalid task ID provided")
            })?;
        parse_task_id(&raw).map(Self)
    }
}
