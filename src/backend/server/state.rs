/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. The
 * `FromRef` implementations let handlers and middleware extract only the
 * part they need:
 *
 * - `State<SharedTaskStore>` in the task handlers
 * - `State<Arc<ServerConfig>>` for configuration
 * - `State<FormatterOptions>` in the error formatter
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::middleware::error_formatter::FormatterOptions;
use crate::backend::server::config::ServerConfig;
use crate::backend::tasks::store::SharedTaskStore;

#[derive(Clone)]
pub struct AppState {
    /// Task storage shared by every handler
    pub store: SharedTaskStore,
    /// Immutable configuration loaded at startup
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: SharedTaskStore, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SharedTaskStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for FormatterOptions {
    fn from_ref(state: &AppState) -> Self {
        FormatterOptions {
            debug: state.config.debug,
        }
    }
}
