use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::SqlitePool;

use crate::auth::token::TokenIssuer;
use crate::db;
use crate::error::AppError;
use crate::models::User;

/// The user named by the request's bearer token.
///
/// Extraction reads `Authorization: Bearer <token>`, verifies the token with the
/// shared `TokenIssuer`, and loads the subject from the database. Any failure,
/// including a valid token whose user no longer exists, is `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Returns the token from an `Authorization` header. The scheme is case-insensitive.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

async fn authenticate(
    token: Option<String>,
    issuer: Option<web::Data<TokenIssuer>>,
    pool: Option<web::Data<SqlitePool>>,
) -> Result<CurrentUser, AppError> {
    let token = token.ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;
    let (issuer, pool) = match (issuer, pool) {
        (Some(issuer), Some(pool)) => (issuer, pool),
        _ => {
            return Err(AppError::InternalServerError(
                "Authentication state is not configured".into(),
            ))
        }
    };

    let claims = issuer.verify(&token)?;
    db::users::find_by_username(&pool, &claims.sub)
        .await?
        .map(CurrentUser)
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))
}

impl FromRequest for CurrentUser {
    type Error = ActixError; // AppError converts via ResponseError
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let issuer = req.app_data::<web::Data<TokenIssuer>>().cloned();
        let pool = req.app_data::<web::Data<SqlitePool>>().cloned();

        Box::pin(async move {
            authenticate(token, issuer, pool)
                .await
                .map_err(ActixError::from)
        })
    }
}
