//! Common test utilities and helpers
//!
//! - Test servers over the in-memory store and failing stores
//! - Optional Postgres fixtures
//! - Envelope assertions

#![allow(dead_code)]

pub mod assertions;
pub mod database;
pub mod server;

pub use assertions::*;
pub use server::*;
