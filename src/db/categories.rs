use super::conflict_as;
use crate::{error::AppError, models::Category};
use sqlx::{SqliteConnection, SqlitePool};

/// Inserts a category. A taken name is reported as `AppError::Conflict`.
pub async fn create(pool: &SqlitePool, name: &str) -> Result<Category, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name) VALUES (?) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(conflict_as("Category already exists"))?;

    log::info!("Category created: id={} name={}", category.id, category.name);
    Ok(category)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(categories)
}

/// Links `item_id` to every category whose id appears in `ids` and returns
/// the number of links written.
///
/// Unknown ids are skipped and repeated ids collapse into one link. Existence
/// is checked inside the insert so the caller's transaction never reads before
/// it writes.
pub async fn link_to_item(
    conn: &mut SqliteConnection,
    item_id: i64,
    ids: &[i64],
) -> Result<u64, AppError> {
    if ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "INSERT INTO item_categories (item_id, category_id)
         SELECT ?, id FROM categories WHERE id IN ({})",
        placeholders
    );

    let mut query = sqlx::query(&sql).bind(item_id);
    for id in ids {
        query = query.bind(*id);
    }

    Ok(query.execute(&mut *conn).await?.rows_affected())
}
