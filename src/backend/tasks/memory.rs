//! In-process task store
//!
//! Used when `TASK_STORE=memory` and by the test suite. Ids are assigned
//! sequentially starting at 1, like a SERIAL column.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::backend::tasks::store::{StoreError, TaskStore};
use crate::shared::task::{NewTask, Task, TaskPatch};

#[derive(Debug)]
struct MemoryState {
    tasks: BTreeMap<i32, Task>,
    next_id: i32,
}

/// Task store backed by a `BTreeMap`
#[derive(Debug)]
pub struct MemoryTaskStore {
    state: RwLock<MemoryState>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                tasks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        // Newest first; ids break ties between equal timestamps
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tasks)
    }

    async fn find(&self, id: i32) -> Result<Option<Task>, StoreError> {
        Ok(self.state.read().await.tasks.get(&id).cloned())
    }

    async fn insert(&self, task: &NewTask) -> Result<Task, StoreError> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Other("task id sequence exhausted".to_string()))?;

        let now = Utc::now();
        let stored = Task {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.tasks.get_mut(&id).map(|task| {
            patch.apply_to(task, Utc::now());
            task.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Task>, StoreError> {
        Ok(self.state.write().await.tasks.remove(&id))
    }
}
