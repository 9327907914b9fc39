mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{bearer, init_app, register, register_and_login, FileDb};
use futures::future::join_all;
use itemforge::db;
use itemforge::models::ItemResponse;
use itemforge::AppError;
use pretty_assertions::assert_eq;
use serde_json::json;

const WRITERS: usize = 40;
const POOL_SIZE: u32 = 5;

/// Exactly one `Ok`, every other outcome a `Conflict`.
fn assert_single_winner<T: std::fmt::Debug>(results: Vec<Result<T, AppError>>) {
    let mut created = 0;
    for result in results {
        match result {
            Ok(_) => created += 1,
            Err(AppError::Conflict(_)) => {}
            Err(other) => panic!("Expected a conflict, got {:?}", other),
        }
    }
    assert_eq!(created, 1);
}

#[actix_rt::test]
async fn test_concurrent_item_creates_all_succeed() {
    let file = FileDb::open("items", POOL_SIZE).await;
    let pool = &file.pool;
    let owner = db::users::create(pool, "alice", "digest").await.unwrap();
    let books = db::categories::create(pool, "Books").await.unwrap();
    let fiction = db::categories::create(pool, "Fiction").await.unwrap();

    let names: Vec<String> = (0..WRITERS).map(|i| format!("item-{}", i)).collect();
    let category_ids = [books.id, 4242, fiction.id];
    let results = join_all(
        names
            .iter()
            .map(|name| db::items::create(pool, owner.id, name, "", &category_ids)),
    )
    .await;

    for result in &results {
        assert!(result.is_ok(), "Create failed: {:?}", result);
    }

    let items = db::items::list_with_relations(pool).await.unwrap();
    assert_eq!(items.len(), WRITERS);
    for details in &items {
        assert_eq!(details.categories, vec!["Books", "Fiction"]);
    }
}

#[actix_rt::test]
async fn test_concurrent_duplicate_categories_conflict() {
    let file = FileDb::open("categories", POOL_SIZE).await;
    let pool = &file.pool;

    let results = join_all((0..WRITERS).map(|_| db::categories::create(pool, "Books"))).await;
    assert_single_winner(results);
    assert_eq!(db::categories::list(pool).await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_concurrent_duplicate_usernames_conflict() {
    let file = FileDb::open("users", POOL_SIZE).await;
    let pool = &file.pool;

    let results = join_all((0..WRITERS).map(|_| db::users::create(pool, "alice", "digest"))).await;
    assert_single_winner(results);
    assert!(db::users::find_by_username(pool, "alice")
        .await
        .unwrap()
        .is_some());
}

#[actix_rt::test]
async fn test_concurrent_requests_never_fail_with_server_error() {
    let file = FileDb::open("http", POOL_SIZE).await;
    let app = init_app(file.pool.clone()).await;
    let token = register_and_login(&app, "writer", "secret").await;

    let item_requests = (0..WRITERS).map(|i| {
        let req = test::TestRequest::post()
            .uri("/items/")
            .insert_header(bearer(&token))
            .set_json(json!({
                "name": format!("item-{}", i),
                "description": "",
                "category_ids": []
            }))
            .to_request();
        test::call_service(&app, req)
    });
    for resp in join_all(item_requests).await {
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let registrations = join_all((0..10).map(|_| register(&app, "racer", "secret"))).await;
    let statuses: Vec<StatusCode> = registrations.iter().map(|resp| resp.status()).collect();
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1,
        "Statuses: {:?}",
        statuses
    );
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::CREATED || *s == StatusCode::CONFLICT));

    let req = test::TestRequest::get().uri("/items/").to_request();
    let items: Vec<ItemResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items.len(), WRITERS);
}
