//! Test server helpers
//!
//! Builds the real router over a chosen store, so every test goes through
//! the full middleware stack.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use tasks_api::backend::routes::create_router;
use tasks_api::backend::server::{AppState, ServerConfig};
use tasks_api::backend::tasks::{MemoryTaskStore, SharedTaskStore, StoreError, TaskStore};
use tasks_api::shared::task::{NewTask, Task, TaskPatch};

/// Configuration with defaults and the in-memory backend
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "TASK_STORE" => Some("memory".to_string()),
        _ => None,
    })
}

/// Test server over the given store and configuration
pub fn server_with_config(store: SharedTaskStore, config: ServerConfig) -> TestServer {
    let app = create_router(AppState::new(store, config));
    TestServer::new(app).expect("Failed to create test server")
}

/// Test server over the given store
pub fn server_with_store(store: SharedTaskStore) -> TestServer {
    server_with_config(store, test_config())
}

/// Test server over a fresh in-memory store
pub fn memory_server() -> TestServer {
    server_with_store(Arc::new(MemoryTaskStore::new()))
}

/// Store whose every operation fails with the same error
pub struct FailingStore {
    pub error: StoreError,
}

impl FailingStore {
    pub fn shared(error: StoreError) -> SharedTaskStore {
        Arc::new(Self { error })
    }
}

#[async_trait]
impl TaskStore for FailingStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Err(self.error.clone())
    }

    async fn find(&self, _id: i32) -> Result<Option<Task>, StoreError> {
        Err(self.error.clone())
    }

    async fn insert(&self, _task: &NewTask) -> Result<Task, StoreError> {
        Err(self.error.clone())
    }

    async fn update(&self, _id: i32, _patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        Err(self.error.clone())
    }

    async fn delete(&self, _id: i32) -> Result<Option<Task>, StoreError> {
        Err(self.error.clone())
    }
}

/// Store that panics on every operation
pub struct PanickingStore;

#[async_trait]
impl TaskStore for PanickingStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        panic!("list exploded")
    }

    async fn find(&self, _id: i32) -> Result<Option<Task>, StoreError> {
        panic!("find exploded")
    }

    async fn insert(&self, _task: &NewTask) -> Result<Task, StoreError> {
        panic!("insert exploded")
    }

    async fn update(&self, _id: i32, _patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        panic!("update exploded")
    }

    async fn delete(&self, _id: i32) -> Result<Option<Task>, StoreError> {
        panic!("delete exploded")
    }
}
