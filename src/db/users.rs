use super::conflict_as;
use crate::{error::AppError, models::User};
use sqlx::SqlitePool;

/// Inserts a user. A taken username is reported as `AppError::Conflict`.
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    hashed_password: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, hashed_password) VALUES (?, ?)
         RETURNING id, username, hashed_password",
    )
    .bind(username)
    .bind(hashed_password)
    .fetch_one(pool)
    .await
    .map_err(conflict_as("Username already registered"))?;

    log::info!("User created: id={} username={}", user.id, user.username);
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, hashed_password FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}
