/**
 * Authentication Middleware
 *
 * Placeholder guard for routes that will eventually require a signed-in
 * user. It currently lets every request through.
 */

use axum::{extract::Request, middleware::Next, response::Response};

/// Pass-through authentication check
pub async fn is_authenticated(request: Request, next: Next) -> Response {
    tracing::trace!(path = %request.uri().path(), "Authentication not enforced");
    next.run(request).await
}
