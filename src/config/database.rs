//! SQLite connection pool initialization.
//!
//! The database URL is read from `DATABASE_URL` and defaults to a local
//! `activities.db` file, which is created on first start. The pool enforces
//! foreign keys and sets a busy timeout so that concurrent write
//! transactions queue on SQLite's single-writer lock instead of failing.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Panics if `DATABASE_URL` is set but unparseable, or if the database
/// cannot be opened. Called once during startup.
pub async fn init_db_pool() -> SqlitePool {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://activities.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)
        .expect("DATABASE_URL must be a valid sqlite connection string")
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to connect to database")
}
