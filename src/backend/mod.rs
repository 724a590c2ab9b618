//! Backend Module
//!
//! This module contains all server-side code for the tasks API.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, provisioning, state, app creation
//! - **`routes`** - Route wiring and middleware stack
//! - **`tasks`** - Task handlers, validation and storage
//! - **`middleware`** - Handler boundary, error formatter, auth placeholder
//! - **`response`** - The `Envelope` every success reply uses
//! - **`error`** - The `ApiError` taxonomy
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs       - Module exports and documentation
//! ├── server/      - Server initialization and state
//! ├── routes/      - Route configuration
//! ├── tasks/       - Task resource
//! ├── middleware/  - Request middleware
//! ├── response/    - Response envelope
//! └── error/       - Error types
//! ```
//!
//! # Request Flow
//!
//! A request passes tracing, compression, CORS, security headers and the
//! body limit, then the error formatter and the panic catcher, then the
//! handler. A handler either returns an [`Envelope`](response::Envelope)
//! or an [`ApiError`](error::ApiError); the latter travels back up as a
//! response extension and is rendered by the formatter.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Task resource
pub mod tasks;

/// Backend error types
pub mod error;

/// Middleware for request processing
pub mod middleware;

/// Response envelope
pub mod response;

pub use error::{ApiError, ApiResult};
pub use response::Envelope;
pub use server::create_app;
