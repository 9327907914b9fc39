use crate::{
    auth::{PasswordHasher, TokenIssuer, TokenResponse},
    db,
    error::AppError,
    models::UserCreate,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::SqlitePool;

/// Login user
///
/// Exchanges a JSON `{username, password}` body for a bearer token. The body
/// uses the registration shape rather than a form-encoded password grant, and
/// is not format-validated: anything that does not match a stored account is a 401.
///
/// ## Responses:
/// - `200 OK`: `{access_token, token_type: "bearer"}`.
/// - `401 Unauthorized`: Unknown username or wrong password (same message for both).
#[post("/token")]
pub async fn login_for_access_token(
    pool: web::Data<SqlitePool>,
    hasher: web::Data<PasswordHasher>,
    issuer: web::Data<TokenIssuer>,
    credentials: web::Json<UserCreate>,
) -> Result<impl Responder, AppError> {
    let UserCreate { username, password } = credentials.into_inner();
    let user = db::users::find_by_username(&pool, &username).await?;

    if let Some(user) = user {
        if hasher
            .verify_blocking(password, user.hashed_password.clone())
            .await?
        {
            let token = issuer.issue(&user.username)?;
            return Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)));
        }
    }

    log::warn!("Failed login attempt for username {:?}", username);
    Err(AppError::Unauthorized(
        "Incorrect username or password".into(),
    ))
}
