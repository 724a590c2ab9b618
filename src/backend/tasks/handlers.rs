/**
 * Task Handlers
 *
 * One handler per CRUD operation on `/api/{version}/tasks`.
 *
 * Each handler validates its input, touches the store at most for one
 * lookup and one mutation, and replies through [`Envelope::response`].
 * Failures are returned as [`ApiError`] and rendered by the error
 * formatter.
 *
 * | Handler | Success | Failure |
 * |---|---|---|
 * | `list_tasks` | 200 `{ tasks, count }` | 500 |
 * | `get_task` | 200 `{ task }` | 400, 404, 500 |
 * | `create_task` | 201 `{ task }` | 400, 500 |
 * | `update_task` | 200 `{ task }` | 400, 404, 500 |
 * | `delete_task` | 200 `{ task }` | 400, 404, 500 |
 */

use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::middleware::boundary::{JsonBody, TaskId};
use crate::backend::response::Envelope;
use crate::backend::tasks::store::SharedTaskStore;
use crate::backend::tasks::validation::{validate_new_task, validate_task_patch};
use crate::shared::task::Task;

#[derive(Serialize)]
struct TaskReply<'a> {
    message: &'a str,
    task: &'a Task,
}

#[derive(Serialize)]
struct TaskListReply<'a> {
    message: &'a str,
    tasks: &'a [Task],
    count: usize,
}

fn reply(payload: impl Serialize) -> ApiResult<Envelope> {
    let value = serde_json::to_value(payload).map_err(ApiError::internal)?;
    Ok(Envelope::response(value))
}

fn task_not_found() -> ApiError {
    ApiError::not_found("Task not found")
}

/// `GET /tasks`
pub async fn list_tasks(State(store): State<SharedTaskStore>) -> ApiResult<Envelope> {
    let tasks = store
        .list()
        .await
        .map_err(|e| ApiError::from_store("retrieve tasks", e))?;

    tracing::debug!(count = tasks.len(), "Listed tasks");

    reply(TaskListReply {
        message: "Tasks retrieved successfully",
        tasks: &tasks,
        count: tasks.len(),
    })
}

/// `GET /tasks/{task_id}`
pub async fn get_task(
    State(store): State<SharedTaskStore>,
    TaskId(id): TaskId,
) -> ApiResult<Envelope> {

    let task = store
        .find(id)
        .await
        .map_err(|e| ApiError::from_store("retrieve task", e))?
        .ok_or_else(task_not_found)?;

    reply(TaskReply {
        message: "Task retrieved successfully",
        task: &task,
    })
}

/// `POST /tasks`
pub async fn create_task(
    State(store): State<SharedTaskStore>,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Envelope> {
    let new_task = validate_new_task(&body)?;

    let task = store
        .insert(&new_task)
        .await
        .map_err(|e| ApiError::from_store("create task", e))?;

    tracing::info!(task_id = task.id, "Task created");

    Ok(reply(TaskReply {
        message: "Task created successfully",
        task: &task,
    })?
    .status(StatusCode::CREATED))
}

/// `PUT /tasks/{task_id}`
///
/// Partial update: only fields present in the body are written.
pub async fn update_task(
    State(store): State<SharedTaskStore>,
    TaskId(id): TaskId,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Envelope> {
    let patch = validate_task_patch(&body)?;

    store
        .find(id)
        .await
        .map_err(|e| ApiError::from_store("update task", e))?
        .ok_or_else(task_not_found)?;

    // The row can disappear between the lookup and the update
    let task = store
        .update(id, &patch)
        .await
        .map_err(|e| ApiError::from_store("update task", e))?
        .ok_or_else(task_not_found)?;

    tracing::info!(task_id = task.id, "Task updated");

    reply(TaskReply {
        message: "Task updated successfully",
        task: &task,
    })
}

/// `DELETE /tasks/{task_id}`
pub async fn delete_task(
    State(store): State<SharedTaskStore>,
    TaskId(id): TaskId,
) -> ApiResult<Envelope> {

    let task = store
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store("delete task", e))?
        .ok_or_else(task_not_found)?;

    tracing::info!(task_id = task.id, "Task deleted");

    reply(TaskReply {
        message: "Task deleted successfully",
        task: &task,
    })
}
