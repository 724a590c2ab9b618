/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables,
 * with defaults suited to local development.
 *
 * # Configuration Sources
 *
 * [`ServerConfig::from_env`] reads the process environment (optionally
 * primed from `.env` by the binary). [`ServerConfig::from_lookup`] takes any
 * key lookup, which keeps parsing testable without touching the real
 * environment.
 *
 * # Error Handling
 *
 * Loading never fails. Values that do not parse are logged and replaced by
 * their defaults.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_NAME: &str = "tasks_db";
const DEFAULT_POOL_MAX: u32 = 10;
const DEFAULT_IDLE_MS: u64 = 30_000;
const DEFAULT_CONNECT_MS: u64 = 5_000;
const DEFAULT_APP_NAME: &str = "tasks-api";

/// Which [`TaskStore`](crate::backend::tasks::TaskStore) backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Full connection URL; takes precedence over the discrete fields
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Explicit `DB_NAME`, if set
    pub name: Option<String>,
    pub pool_max: u32,
    pub idle_timeout: Duration,
    pub connect_timeout: Duration,
    pub application_name: String,
    /// Admin URL used to create the database at startup
    pub admin_url: Option<String>,
}

impl DatabaseSettings {
    /// Connection options for the application pool
    ///
    /// # Errors
    ///
    /// Returns an error when `DATABASE_URL` is set but not a valid
    /// Postgres URL.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.url {
            Some(url) => PgConnectOptions::from_str(url)?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database_name()),
        };
        Ok(options.application_name(&self.application_name))
    }

    /// Pool sizing and timeouts
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.pool_max)
            .idle_timeout(self.idle_timeout)
            .acquire_timeout(self.connect_timeout)
    }

    /// Name of the application database
    ///
    /// `DB_NAME` wins, then the path of `DATABASE_URL`, then `tasks_db`.
    pub fn database_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.url
            .as_deref()
            .and_then(|url| PgConnectOptions::from_str(url).ok())
            .and_then(|options| options.get_database().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string())
    }
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub api_version: String,
    /// Enables verbose server-side error logging
    pub debug: bool,
    /// Allowed CORS origins; `None` allows any origin
    pub whitelist_urls: Option<Vec<String>>,
    pub store: StoreBackend,
    pub database: DatabaseSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Invalid configuration value, using default");
                default
            }
        },
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Example
    ///
    /// ```rust
    /// use tasks_api::backend::server::config::ServerConfig;
    ///
    /// let config = ServerConfig::from_lookup(|key| match key {
    ///     "APP_PORT" => Some("8080".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.port, 8080);
    /// assert_eq!(config.api_prefix(), "/api/v1");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let whitelist_urls = non_blank(lookup("WHITELIST_URLS")).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect()
        });

        let store = match lookup("TASK_STORE").as_deref().map(str::trim) {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                tracing::warn!(value = other, "Unknown TASK_STORE, using postgres");
                StoreBackend::Postgres
            }
        };

        let database = DatabaseSettings {
            url: non_blank(lookup("DATABASE_URL")),
            host: non_blank(lookup("DB_HOST")).unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            port: parse_or("DB_PORT", lookup("DB_PORT"), DEFAULT_DB_PORT),
            user: non_blank(lookup("DB_USER")).unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: non_blank(lookup("DB_NAME")),
            pool_max: parse_or("DB_POOL_MAX", lookup("DB_POOL_MAX"), DEFAULT_POOL_MAX),
            idle_timeout: Duration::from_millis(parse_or(
                "DB_IDLE_MS",
                lookup("DB_IDLE_MS"),
                DEFAULT_IDLE_MS,
            )),
            connect_timeout: Duration::from_millis(parse_or(
                "DB_CONNECT_MS",
                lookup("DB_CONNECT_MS"),
                DEFAULT_CONNECT_MS,
            )),
            application_name: non_blank(lookup("APP_NAME"))
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            admin_url: non_blank(lookup("DB_ADMIN_URL")),
        };

        Self {
            port: parse_or("APP_PORT", lookup("APP_PORT"), DEFAULT_PORT),
            api_version: non_blank(lookup("API_VERSION"))
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            debug: lookup("APP_DEBUG").as_deref() == Some("true"),
            whitelist_urls,
            store,
            database,
        }
    }

    /// Path prefix for the versioned API, e.g. `/api/v1`
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api_version)
    }
}
