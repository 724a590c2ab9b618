//! Response Module
//!
//! Uniform JSON reply shapes shared by all handlers.
//!
//! - **`envelope`** - `Envelope` builder and the `Message` payload union

/// Envelope builder and send operations
pub mod envelope;

pub use envelope::{has_attachable_data, Envelope, Message};
