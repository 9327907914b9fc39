use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A category row; also the response shape for the category endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryCreate {
    /// Must not be empty. No upper bound.
    #[validate(length(min = 1))]
    pub name: String,
}
