use crate::{
    auth::CurrentUser,
    db,
    error::AppError,
    models::{ItemCreate, ItemResponse},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::SqlitePool;
use validator::Validate;

/// Creates a new item owned by the authenticated user.
///
/// ## Request Body:
/// - `name`: 1 to 200 characters.
/// - `description`: up to 1000 characters.
/// - `category_ids`: ids of existing categories. Unknown ids are dropped.
///
/// ## Responses:
/// - `201 Created`: The shaped item, with owner summary and category names.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `422 Unprocessable Entity`: Invalid or missing fields.
#[post("/items/")]
pub async fn create_item(
    pool: web::Data<SqlitePool>,
    current_user: CurrentUser,
    item_data: web::Json<ItemCreate>,
) -> Result<impl Responder, AppError> {
    item_data.validate()?;
    let CurrentUser(owner) = current_user;

    let item = db::items::create(
        &pool,
        owner.id,
        &item_data.name,
        &item_data.description,
        &item_data.category_ids,
    )
    .await?;

    let details = db::items::get_with_relations(&pool, item.id)
        .await?
        .ok_or_else(|| AppError::InternalServerError("Created item could not be loaded".into()))?;

    Ok(HttpResponse::Created().json(ItemResponse::from(details)))
}

/// Lists every item in storage order. Public.
#[get("/items/")]
pub async fn read_items(pool: web::Data<SqlitePool>) -> Result<impl Responder, AppError> {
    let items: Vec<ItemResponse> = db::items::list_with_relations(&pool)
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(items))
}
