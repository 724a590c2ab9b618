//! Task storage port
//!
//! Handlers never see SQL. They talk to a [`TaskStore`], which issues exactly
//! one parameterized statement per call. The Postgres implementation lives in
//! [`super::db`], the in-process one in [`super::memory`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::task::{NewTask, Task, TaskPatch};

/// SQLSTATE: undefined_table
pub const UNDEFINED_TABLE: &str = "42P01";
/// SQLSTATE: invalid_authorization_specification
pub const INVALID_AUTHORIZATION: &str = "28000";
/// SQLSTATE: duplicate_database
pub const DUPLICATE_DATABASE: &str = "42P04";

/// Low-level storage failure
///
/// Keeps just enough of the driver error for the handlers to classify it.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The database rejected the statement
    #[error("{message}")]
    Database {
        /// SQLSTATE code, when the driver reported one
        code: Option<String>,
        /// Driver message
        message: String,
    },

    /// The database server refused the connection
    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    /// Anything else (pool timeout, decode failure, ...)
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Build a database error with a SQLSTATE code
    pub fn database(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Database {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// SQLSTATE code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Database { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => Self::Database {
                code: db.code().map(|c| c.into_owned()),
                message: db.message().to_string(),
            },
            sqlx::Error::Io(io) if io.kind() == std::io::ErrorKind::ConnectionRefused => {
                Self::ConnectionRefused(io.to_string())
            }
            _ => Self::Other(err.to_string()),
        }
    }
}

/// Storage operations needed by the task handlers
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, newest first
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Task by id
    async fn find(&self, id: i32) -> Result<Option<Task>, StoreError>;

    /// Insert a task and return the stored row
    async fn insert(&self, task: &NewTask) -> Result<Task, StoreError>;

    /// Apply a partial update; `None` when the row does not exist
    async fn update(&self, id: i32, patch: &TaskPatch) -> Result<Option<Task>, StoreError>;

    /// Delete a task and return the removed row; `None` when absent
    async fn delete(&self, id: i32) -> Result<Option<Task>, StoreError>;

    /// Release held resources; called once during shutdown
    async fn close(&self) {}
}

/// Store handle shared across request handlers
pub type SharedTaskStore = Arc<dyn TaskStore>;
