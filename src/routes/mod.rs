pub mod auth;
pub mod categories;
pub mod health;
pub mod items;
pub mod users;

use crate::error::AppError;
use actix_web::web;

/// Registers every API route plus the JSON extractor configuration.
///
/// Expects `web::Data<SqlitePool>`, `web::Data<TokenIssuer>` and
/// `web::Data<PasswordHasher>` to be provided by the enclosing `App`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(users::create_user)
        .service(users::read_users_me)
        .service(auth::login_for_access_token)
        .service(items::create_item)
        .service(items::read_items)
        .service(categories::create_category)
        .service(categories::read_categories);
}

/// Malformed or incomplete JSON bodies are validation failures (422), not 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
