use super::user::UserResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An item row as stored in the `items` table.
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for `POST /items/`.
#[derive(Debug, Deserialize, Validate)]
pub struct ItemCreate {
    /// Must not be empty. No upper bound.
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    /// Ids that do not match an existing category are ignored.
    pub category_ids: Vec<i64>,
}

/// An item with its owner and category names resolved.
#[derive(Debug, Clone)]
pub struct ItemDetails {
    pub item: Item,
    pub owner: UserResponse,
    pub categories: Vec<String>,
}

/// Response shape for the item endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub owner: UserResponse,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ItemDetails> for ItemResponse {
    fn from(details: ItemDetails) -> Self {
        let ItemDetails {
            item,
            owner,
            categories,
        } = details;
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            owner,
            categories,
            created_at: item.created_at,
        }
    }
}
