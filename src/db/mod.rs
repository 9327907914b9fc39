//! SQLite persistence: pool construction, schema bootstrap, and one repository
//! module per table.

pub mod categories;
pub mod items;
pub mod users;

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        username        TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS items (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        description TEXT NOT NULL,
        owner_id    INTEGER NOT NULL REFERENCES users(id),
        created_at  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_items_name ON items(name)",
    "CREATE TABLE IF NOT EXISTS categories (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS item_categories (
        item_id     INTEGER NOT NULL REFERENCES items(id),
        category_id INTEGER NOT NULL REFERENCES categories(id),
        PRIMARY KEY (item_id, category_id)
    )",
];

/// Opens the connection pool, creating the database file if it does not exist.
///
/// Connections are kept for the life of the pool so that `sqlite::memory:`
/// databases survive between requests. Every connection to an in-memory URL
/// opens its own private database, so such pools are held to one connection
/// whatever `max_connections` asks for.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let max_connections = effective_max_connections(database_url, max_connections);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    log::info!(
        "Connected to database at {} (max {} connections)",
        database_url,
        max_connections
    );
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn effective_max_connections(database_url: &str, requested: u32) -> u32 {
    if is_in_memory(database_url) {
        if requested > 1 {
            log::warn!(
                "In-memory database {} is limited to one connection (requested {})",
                database_url,
                requested
            );
        }
        1
    } else {
        requested.max(1)
    }
}

/// Creates any missing tables. Safe to run on every startup.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    log::info!("Database schema is up to date");
    Ok(())
}

/// Replaces the generic unique-violation message with a field-specific one.
pub(crate) fn conflict_as(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |error| match AppError::from(error) {
        AppError::Conflict(_) => AppError::Conflict(message.into()),
        other => other,
    }
}
