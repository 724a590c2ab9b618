//! API Error Module
//!
//! This module defines the application error taxonomy used by every handler.
//!
//! # Architecture
//!
//! - **`types`** - `ApiError` and its `ErrorKind` discriminant
//! - **`conversion`** - `IntoResponse` (forwarding to the formatter) and
//!   storage failure classification
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use tasks_api::backend::error::ApiError;
//! use tasks_api::backend::response::Envelope;
//!
//! async fn handler() -> Result<Envelope, ApiError> {
//!     Err(ApiError::not_found("Task not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{ApiError, ErrorKind};

/// Result type returned by route handlers
pub type ApiResult<T> = Result<T, ApiError>;
