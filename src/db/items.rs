use super::categories;
use crate::{
    error::AppError,
    models::{Item, ItemDetails, UserResponse},
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;

const SELECT_WITH_OWNER: &str =
    "SELECT i.id, i.name, i.description, i.owner_id, i.created_at, u.username AS owner_username
     FROM items i
     JOIN users u ON u.id = i.owner_id";

const SELECT_CATEGORY_NAMES: &str = "SELECT ic.item_id, c.name
     FROM item_categories ic
     JOIN categories c ON c.id = ic.category_id";

#[derive(Debug, FromRow)]
struct ItemWithOwnerRow {
    id: i64,
    name: String,
    description: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    owner_username: String,
}

impl ItemWithOwnerRow {
    fn into_details(self, categories: Vec<String>) -> ItemDetails {
        ItemDetails {
            owner: UserResponse {
                id: self.owner_id,
                username: self.owner_username,
            },
            item: Item {
                id: self.id,
                name: self.name,
                description: self.description,
                owner_id: self.owner_id,
                created_at: self.created_at,
            },
            categories,
        }
    }
}

/// Creates an item owned by `owner_id` and links it to every category in
/// `category_ids` that exists. Runs in a single transaction.
///
/// The item insert is the first statement of the transaction, so a writer
/// that finds the database locked waits on the busy timeout instead of
/// failing straight away.
pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    name: &str,
    description: &str,
    category_ids: &[i64],
) -> Result<Item, AppError> {
    let mut tx = pool.begin().await?;

    let item = sqlx::query_as::<_, Item>(
        "INSERT INTO items (name, description, owner_id, created_at) VALUES (?, ?, ?, ?)
         RETURNING id, name, description, owner_id, created_at",
    )
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    let linked = categories::link_to_item(&mut tx, item.id, category_ids).await?;

    tx.commit().await?;

    if (linked as usize) < category_ids.len() {
        log::debug!(
            "Item {} linked to {} of {} requested categories",
            item.id,
            linked,
            category_ids.len()
        );
    }
    log::info!("Item created: id={} owner_id={}", item.id, item.owner_id);
    Ok(item)
}

/// Loads one item with its owner and category names.
pub async fn get_with_relations(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<ItemDetails>, AppError> {
    let sql = format!("{} WHERE i.id = ?", SELECT_WITH_OWNER);
    let row = sqlx::query_as::<_, ItemWithOwnerRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let sql = format!("{} WHERE ic.item_id = ? ORDER BY c.id", SELECT_CATEGORY_NAMES);
    let categories = sqlx::query_as::<_, (i64, String)>(&sql)
        .bind(id)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(_, name)| name)
        .collect();

    Ok(Some(row.into_details(categories)))
}

/// Loads every item in storage order. Owners come from a join and all
/// category names from one extra query, independent of the number of items.
pub async fn list_with_relations(pool: &SqlitePool) -> Result<Vec<ItemDetails>, AppError> {
    let sql = format!("{} ORDER BY i.id", SELECT_WITH_OWNER);
    let rows = sqlx::query_as::<_, ItemWithOwnerRow>(&sql)
        .fetch_all(pool)
        .await?;

    let sql = format!("{} ORDER BY ic.item_id, c.id", SELECT_CATEGORY_NAMES);
    let links = sqlx::query_as::<_, (i64, String)>(&sql)
        .fetch_all(pool)
        .await?;

    let mut names_by_item: HashMap<i64, Vec<String>> = HashMap::new();
    for (item_id, name) in links {
        names_by_item.entry(item_id).or_default().push(name);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let categories = names_by_item.remove(&row.id).unwrap_or_default();
            row.into_details(categories)
        })
        .collect())
}
