use crate::{db, error::AppError, models::CategoryCreate};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::SqlitePool;
use validator::Validate;

/// Creates a category. Public; a duplicate name is a 409.
#[post("/categories/")]
pub async fn create_category(
    pool: web::Data<SqlitePool>,
    category_data: web::Json<CategoryCreate>,
) -> Result<impl Responder, AppError> {
    category_data.validate()?;
    let category = db::categories::create(&pool, &category_data.name).await?;
    Ok(HttpResponse::Created().json(category))
}

#[get("/categories/")]
pub async fn read_categories(pool: web::Data<SqlitePool>) -> Result<impl Responder, AppError> {
    let categories = db::categories::list(&pool).await?;
    Ok(HttpResponse::Ok().json(categories))
}
