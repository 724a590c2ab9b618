//! Database operations for tasks
//!
//! Every call issues a single parameterized statement against the `tasks`
//! table. Driver errors are converted into [`StoreError`] so handlers can
//! classify them.
//!
//! The pool retries refused connections until its acquire timeout and then
//! reports `PoolTimedOut`, which hides the cause. On that error the store
//! makes one direct connection attempt and reports what it ran into.

use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection, PgPool, Postgres, QueryBuilder};

use crate::backend::tasks::store::{StoreError, TaskStore};
use crate::shared::task::{NewTask, Task, TaskPatch};

const TASK_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Postgres-backed task store
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
    /// Options the pool was built from, used to diagnose pool timeouts
    options: PgConnectOptions,
}

impl PgTaskStore {
    pub fn new(pool: PgPool, options: PgConnectOptions) -> Self {
        Self { pool, options }
    }

    /// Convert a driver error, looking behind `PoolTimedOut`
    async fn diagnose(&self, err: sqlx::Error) -> StoreError {
        if !matches!(err, sqlx::Error::PoolTimedOut) {
            return err.into();
        }

        match PgConnection::connect_with(&self.options).await {
            Ok(conn) => {
                if let Err(e) = conn.close().await {
                    tracing::debug!("Failed to close diagnostic connection: {}", e);
                }
                err.into()
            }
            Err(cause) => match StoreError::from(cause) {
                classified @ (StoreError::ConnectionRefused(_) | StoreError::Database { .. }) => {
                    classified
                }
                StoreError::Other(_) => err.into(),
            },
        }
    }
}

/// Build the partial `UPDATE` for a patch
///
/// Only fields present in the patch are assigned; `updated_at` is always
/// refreshed.
pub fn build_update(id: i32, patch: &TaskPatch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE tasks SET ");
    {
        let mut assignments = builder.separated(", ");
        if let Some(title) = &patch.title {
            assignments.push("title = ");
            assignments.push_bind_unseparated(title.clone());
        }
        if let Some(description) = &patch.description {
            assignments.push("description = ");
            assignments.push_bind_unseparated(description.clone());
        }
        if let Some(completed) = patch.completed {
            assignments.push("completed = ");
            assignments.push_bind_unseparated(completed);
        }
        assignments.push("updated_at = now()");
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING ");
    builder.push(TASK_COLUMNS);
    builder
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks ORDER BY created_at DESC",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        match tasks {
            Ok(tasks) => Ok(tasks),
            Err(e) => Err(self.diagnose(e).await),
        }
    }

    async fn find(&self, id: i32) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        match task {
            Ok(task) => Ok(task),
            Err(e) => Err(self.diagnose(e).await),
        }
    }

    async fn insert(&self, task: &NewTask) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, completed)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .fetch_one(&self.pool)
        .await;
        match task {
            Ok(task) => Ok(task),
            Err(e) => Err(self.diagnose(e).await),
        }
    }

    async fn update(&self, id: i32, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        let mut builder = build_update(id, patch);
        let task = builder
            .build_query_as::<Task>()
            .fetch_optional(&self.pool)
            .await;
        match task {
            Ok(task) => Ok(task),
            Err(e) => Err(self.diagnose(e).await),
        }
    }

    async fn delete(&self, id: i32) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "DELETE FROM tasks WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        match task {
            Ok(task) => Ok(task),
            Err(e) => Err(self.diagnose(e).await),
        }
    }

    async fn close(&self) {
        tracing::info!("Closing database pool");
        self.pool.close().await;
    }
}
