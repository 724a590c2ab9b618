/**
 * Centralized Error Formatter
 *
 * The terminal stage for every forwarded error. Installed after all routes,
 * it replaces the empty body of any response carrying a
 * [`ForwardedError`] with the canonical error body:
 *
 * ```json
 * { "success": false, "error": true, "message": "Task not found" }
 * ```
 *
 * The status is the error's own status code. Formatting never fails and
 * never inspects or alters the original error.
 *
 * # Debug Mode
 *
 * With `APP_DEBUG=true` the full error is logged at `debug` level. The body
 * stays the same: no stack traces or source locations reach the client.
 */

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::backend::error::ApiError;
use crate::backend::middleware::boundary::ForwardedError;

/// Canonical error body
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub success: bool,
    pub error: bool,
    pub message: String,
}

/// Formatter settings
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatterOptions {
    /// Log full error details server-side
    pub debug: bool,
}

/// Render an error into its status and body
pub fn format_error(error: &ApiError) -> (StatusCode, ErrorBody) {
    let body = ErrorBody {
        success: false,
        error: true,
        message: error.message().to_string(),
    };
    (error.status_code(), body)
}

/// Middleware that renders forwarded errors
pub async fn error_formatter(
    State(options): State<FormatterOptions>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let Some(ForwardedError(error)) = response.extensions().get::<ForwardedError>().cloned()
    else {
        return response;
    };

    let (status, body) = format_error(&error);

    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), kind = error.name(), "{}", error);
    } else {
        tracing::warn!(%method, %path, status = status.as_u16(), kind = error.name(), "{}", error);
    }
    if options.debug {
        tracing::debug!(error = ?error, json = %error.to_json(), "Forwarded error detail");
    }

    let bytes = serde_json::to_vec(&body).unwrap_or_else(|_| {
        br#"{"success":false,"error":true,"message":"Internal Server Error"}"#.to_vec()
    });

    let (mut parts, _) = response.into_parts();
    parts.status = status;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.extensions.remove::<ForwardedError>();

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_uses_error_status() {
        let error = ApiError::not_found("Task not found");
        let (status, body) = format_error(&error);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            ErrorBody {
                success: false,
                error: true,
                message: "Task not found".to_string(),
            }
        );
    }

    #[test]
    fn test_format_does_not_touch_original() {
        let error = ApiError::application("Title cannot be empty");
        let before = error.to_json();
        let _ = format_error(&error);
        assert_eq!(error.to_json(), before);
    }

    #[test]
    fn test_body_serialization() {
        let (_, body) = format_error(&ApiError::internal("db down"));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "success": false, "error": true, "message": "db down" })
        );
    }

    async fn render(options: FormatterOptions, error: ApiError) -> (StatusCode, serde_json::Value) {
        use axum::{middleware::from_fn_with_state, routing::get, Router};
        use tower::ServiceExt;

        let app = Router::new()
            .route(
                "/",
                get(move || {
                    let error = error.clone();
                    async move { Err::<(), ApiError>(error) }
                }),
            )
            .layer(from_fn_with_state(options, error_formatter));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        assert!(response.extensions().get::<ForwardedError>().is_none());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_debug_mode_does_not_enrich_body() {
        let error = ApiError::internal("connection reset by peer");
        let (status, body) = render(FormatterOptions { debug: true }, error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "error": true,
                "message": "connection reset by peer",
            })
        );
    }

    #[tokio::test]
    async fn test_debug_mode_omits_resource_data() {
        let error = ApiError::resource("task", serde_json::json!({ "id": 9 }));
        let (status, body) = render(FormatterOptions { debug: true }, error).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "error": true,
                "message": "The resource task was not found.",
            })
        );
    }

    #[tokio::test]
    async fn test_rendered_body_matches_without_debug() {
        let error = ApiError::internal("connection reset by peer");
        let plain = render(FormatterOptions::default(), error.clone()).await;
        let debug = render(FormatterOptions { debug: true }, error).await;
        assert_eq!(plain, debug);
    }
}
