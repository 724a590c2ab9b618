/**
 * Server Initialization
 *
 * This module builds the task store and the router from a loaded
 * [`ServerConfig`].
 *
 * # Initialization Process
 *
 * 1. Provision the database through `DB_ADMIN_URL` (opt-in)
 * 2. Build the task store selected by `TASK_STORE`
 * 3. Run migrations (Postgres only)
 * 4. Create the router
 *
 * # Error Handling
 *
 * A malformed database configuration or a failed provisioning step stops
 * startup with an [`InitError`]. Migration failures are logged and the
 * server still starts. The Postgres pool connects lazily, so an unreachable
 * database surfaces as classified 500 responses instead of a failed boot.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{ServerConfig, StoreBackend};
use crate::backend::server::provision::{create_database_if_not_exists, ProvisionError};
use crate::backend::server::state::AppState;
use crate::backend::tasks::{MemoryTaskStore, PgTaskStore, SharedTaskStore};

/// Startup failure that prevents the server from serving
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to provision database: {0}")]
    Provision(#[from] ProvisionError),

    #[error("invalid database configuration: {0}")]
    Config(#[from] sqlx::Error),
}

/// Create and configure the Axum application
///
/// Returns the router together with the store handle, so the caller can
/// close the store once the server has stopped.
///
/// # Errors
///
/// See [`load_store`].
pub async fn create_app(
    config: ServerConfig,
) -> Result<(Router<()>, SharedTaskStore), InitError> {
    tracing::info!(
        api_version = %config.api_version,
        debug = config.debug,
        "Initializing tasks API"
    );

    let store = load_store(&config).await?;
    let app = create_router(AppState::new(store.clone(), config));

    tracing::info!("Router configured");

    Ok((app, store))
}

/// Build the configured task store
///
/// The in-memory store is only used when `TASK_STORE=memory`.
///
/// # Errors
///
/// Returns an error when `DATABASE_URL` cannot be parsed or when database
/// provisioning through `DB_ADMIN_URL` fails.
pub async fn load_store(config: &ServerConfig) -> Result<SharedTaskStore, InitError> {
    match config.store {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory task store");
            Ok(Arc::new(MemoryTaskStore::new()))
        }
        StoreBackend::Postgres => load_postgres_store(config).await,
    }
}

async fn load_postgres_store(config: &ServerConfig) -> Result<SharedTaskStore, InitError> {
    let settings = &config.database;

    if !create_database_if_not_exists(settings).await? {
        tracing::debug!("DB_ADMIN_URL not set, skipping database provisioning");
    }

    let options = settings.connect_options()?;

    tracing::info!(database = %settings.database_name(), "Creating database connection pool");
    let pool = settings.pool_options().connect_lazy_with(options.clone());

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(Arc::new(PgTaskStore::new(pool, options)))
}
