//! Database provisioning
//!
//! Opt-in startup step: when `DB_ADMIN_URL` is set, the application
//! database is created through that admin connection if it does not exist.

use sqlx::{Connection, PgConnection};
use thiserror::Error;

use crate::backend::server::config::DatabaseSettings;
use crate::backend::tasks::store::DUPLICATE_DATABASE;

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The database name is not a plain identifier
    #[error("invalid database name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// True for names matching `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_database_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Create the application database unless it already exists
///
/// Returns `Ok(false)` when there is no admin URL configured.
pub async fn create_database_if_not_exists(
    settings: &DatabaseSettings,
) -> Result<bool, ProvisionError> {
    let Some(admin_url) = &settings.admin_url else {
        return Ok(false);
    };

    let name = settings.database_name();
    if !is_valid_database_name(&name) {
        return Err(ProvisionError::InvalidName(name));
    }

    let mut admin = PgConnection::connect(admin_url).await?;
    // CREATE DATABASE takes no bind parameters; the name is validated above
    let statement = format!("CREATE DATABASE \"{}\"", name);
    let result = sqlx::query(&statement).execute(&mut admin).await;

    let outcome = match result {
        Ok(_) => {
            tracing::info!(database = %name, "Database created");
            Ok(true)
        }
        Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(DUPLICATE_DATABASE) => {
            tracing::info!(database = %name, "Database already exists");
            Ok(true)
        }
        Err(e) => Err(ProvisionError::from(e)),
    };

    if let Err(e) = admin.close().await {
        tracing::warn!("Failed to close admin connection: {}", e);
    }

    outcome
}
