/**
 * Router Configuration
 *
 * This module assembles the API routes and the middleware stack into a
 * single Axum router.
 *
 * # Layer Order
 *
 * From the handler outwards:
 *
 * 1. `CatchPanicLayer` - panics become a forwarded 500
 * 2. `error_formatter` - renders every forwarded `ApiError`
 * 3. Body limit (50 MB)
 * 4. Security headers
 * 5. CORS
 * 6. Gzip compression
 * 7. Request tracing
 *
 * The formatter sits directly outside the panic layer so that every error a
 * handler can produce passes through it exactly once.
 */

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::backend::middleware::boundary::forward_panic;
use crate::backend::middleware::error_formatter::{error_formatter, FormatterOptions};
use crate::backend::routes::api_routes::{configure_api_routes, route_not_found};
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Maximum accepted request body
pub const BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Build the CORS policy from `WHITELIST_URLS`
///
/// Without a whitelist any origin is allowed. Entries that are not valid
/// header values are skipped.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match &config.whitelist_urls {
        None => cors.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            cors.allow_origin(AllowOrigin::list(origins))
        }
    }
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Store and configuration shared by the handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();
    let formatter = FormatterOptions {
        debug: config.debug,
    };

    let router = configure_api_routes(Router::new(), &config.api_prefix());

    router
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(forward_panic))
        .layer(from_fn_with_state(formatter, error_formatter))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors_layer(&config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
