//! Shared Module
//!
//! Data types used by the handlers, the stores and the tests.

/// Task data structure
pub mod task;

pub use task::{NewTask, Task, TaskPatch};
