//! Server Module
//!
//! Configuration, startup provisioning, application state and router
//! construction.
//!
//! - **`config`** - environment-driven `ServerConfig`
//! - **`provision`** - opt-in `CREATE DATABASE`
//! - **`state`** - `AppState` and its `FromRef` projections
//! - **`init`** - store selection and `create_app`

pub mod config;
pub mod init;
pub mod provision;
pub mod state;

pub use config::ServerConfig;
pub use init::{create_app, InitError};
pub use state::AppState;
