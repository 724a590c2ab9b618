//! Task Resource
//!
//! CRUD over the `tasks` table.
//!
//! - **`store`** - `TaskStore` trait and `StoreError`
//! - **`db`** - Postgres implementation
//! - **`memory`** - in-process implementation
//! - **`validation`** - request body and path checks
//! - **`handlers`** - axum handlers

pub mod db;
pub mod handlers;
pub mod memory;
pub mod store;
pub mod validation;

pub use db::PgTaskStore;
pub use memory::MemoryTaskStore;
pub use store::{SharedTaskStore, StoreError, TaskStore};
