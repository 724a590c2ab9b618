//! Task Data Structure
//!
//! The only persisted resource exposed by the API. Field names on the wire
//! match the `tasks` table columns, so rows serialize unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for a task title
pub const TITLE_MAX_LEN: usize = 255;

/// A task as stored in the `tasks` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Task {
    /// Server-assigned identifier (SERIAL)
    pub id: i32,
    /// Task title, trimmed, never blank
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// When the row was inserted
    pub created_at: DateTime<Utc>,
    /// When the row was last modified
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Validated partial update
///
/// `None` means "not present in the request". For `description`,
/// `Some(None)` is an explicit `null` that clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// True when no recognized field was supplied
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Apply the patch to an in-memory task, stamping `updated_at`
    pub fn apply_to(&self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        task.updated_at = now;
    }
}
