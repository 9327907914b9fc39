use crate::{
    auth::{CurrentUser, PasswordHasher},
    db,
    error::AppError,
    models::{UserCreate, UserResponse},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::SqlitePool;

/// Register a new user
///
/// Hashes the password and stores the account.
///
/// ## Responses:
/// - `201 Created`: `{id, username}`.
/// - `409 Conflict`: The username is already registered.
/// - `422 Unprocessable Entity`: Missing or non-string fields.
#[post("/users/")]
pub async fn create_user(
    pool: web::Data<SqlitePool>,
    hasher: web::Data<PasswordHasher>,
    user_data: web::Json<UserCreate>,
) -> Result<impl Responder, AppError> {
    let UserCreate { username, password } = user_data.into_inner();
    let hashed_password = hasher.hash_blocking(password).await?;
    let user = db::users::create(&pool, &username, &hashed_password).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Returns the user identified by the bearer token.
#[get("/users/me/")]
pub async fn read_users_me(current_user: CurrentUser) -> impl Responder {
    let CurrentUser(user) = current_user;
    HttpResponse::Ok().json(UserResponse::from(&user))
}
