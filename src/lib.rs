//! Tasks API - Main Library
//!
//! A REST API over a single `task` resource backed by PostgreSQL.
//!
//! # Module Structure
//!
//! - **`shared`** - The `Task` model and its validated inputs
//! - **`backend`** - Axum server: routes, handlers, storage, the error
//!   taxonomy and the response envelope
//!
//! # Usage
//!
//! ```rust,no_run
//! use tasks_api::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (app, store) = create_app(ServerConfig::from_env()).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! store.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<Envelope, ApiError>`. Errors are forwarded to a
//! single formatter middleware that renders
//! `{ "success": false, "error": true, "message": ... }`.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
