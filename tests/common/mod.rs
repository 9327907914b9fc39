#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::Duration;
use itemforge::auth::{PasswordHasher, TokenIssuer, TokenResponse};
use itemforge::{db, routes};
use serde_json::json;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_SECRET: &str = "integration-test-secret";

/// A fresh, migrated in-memory database. One connection keeps it alive.
pub async fn test_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to migrate test database");
    pool
}

/// A migrated database in a fresh temporary file, removed again on drop.
pub struct FileDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl FileDb {
    pub async fn open(tag: &str, max_connections: u32) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Clock before epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "itemforge-{}-{}-{}.db",
            tag,
            std::process::id(),
            nanos
        ));
        let url = format!("sqlite://{}", path.display());

        let pool = db::connect(&url, max_connections)
            .await
            .expect("Failed to open file database");
        db::migrate(&pool).await.expect("Failed to migrate test database");
        Self { pool, path }
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn token_issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, Duration::minutes(30))
}

pub async fn init_app(
    pool: SqlitePool,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(token_issuer()))
            .app_data(web::Data::new(PasswordHasher::new(4)))
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config),
    )
    .await
}

pub async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> ServiceResponse<impl MessageBody> {
    let req = test::TestRequest::post()
        .uri("/users/")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await
}

pub async fn login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> ServiceResponse<impl MessageBody> {
    let req = test::TestRequest::post()
        .uri("/token")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await
}

/// Registers `username` and returns a bearer token for it.
pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let resp = register(app, username, password).await;
    assert!(
        resp.status().is_success(),
        "Setup: failed to register {}: {}",
        username,
        resp.status()
    );

    let resp = login(app, username, password).await;
    assert!(resp.status().is_success(), "Setup: failed to log in {}", username);
    let body: TokenResponse = test::read_body_json(resp).await;
    body.access_token
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
