//! Route Configuration Module
//!
//! - **`router`** - router assembly and middleware stack
//! - **`api_routes`** - task endpoints and the service info route
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - Main router creation
//! └── api_routes.rs - API endpoint wiring
//! ```

pub mod api_routes;
pub mod router;

pub use router::create_router;
