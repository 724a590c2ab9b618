//! Middleware Module
//!
//! Request and response processing shared by all routes.
//!
//! # Architecture
//!
//! - **`boundary`** - forwards handler failures (errors, panics, body
//!   rejections) to the formatter
//! - **`error_formatter`** - renders forwarded errors as JSON
//! - **`auth`** - placeholder authentication guard
//!
//! The formatter must wrap every route and the fallback so no forwarded
//! error escapes unrendered; see `routes::router`.

pub mod auth;
pub mod boundary;
pub mod error_formatter;

pub use auth::is_authenticated;
pub use boundary::{forward_panic, ForwardedError, JsonBody, TaskId};
pub use error_formatter::{error_formatter, format_error, ErrorBody, FormatterOptions};
