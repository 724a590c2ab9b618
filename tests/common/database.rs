//! Database test fixtures and utilities
//!
//! Postgres-backed tests only run when `DATABASE_URL` points at a
//! disposable database; the tasks table is truncated between tests.

use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;

/// Connect options from `DATABASE_URL`
pub fn test_connect_options() -> PgConnectOptions {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a disposable test database");
    PgConnectOptions::from_str(&database_url).expect("DATABASE_URL must be a Postgres URL")
}

/// Create a test pool from `DATABASE_URL` and run migrations
pub async fn create_test_pool() -> PgPool {
    let pool = PgPool::connect_with(test_connect_options())
        .await
        .expect("Failed to create test database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Remove all tasks and reset the id sequence
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE tasks RESTART IDENTITY")
        .execute(pool)
        .await?;
    Ok(())
}
