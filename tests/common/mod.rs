#![allow(dead_code)]

use axum_test::TestServer;
use link_shortener::application::services::LinkService;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://s.test";

pub fn create_state(repository: Arc<dyn LinkRepository>) -> AppState {
    let link_service = LinkService::new(repository, TEST_BASE_URL);
    AppState::new(Arc::new(link_service))
}

pub fn create_test_state() -> AppState {
    create_state(Arc::new(InMemoryLinkRepository::new()))
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    create_state(Arc::new(PgLinkRepository::new(Arc::new(pool))))
}

pub fn create_test_server() -> TestServer {
    TestServer::new(app_router(create_test_state())).unwrap()
}

/// Extracts the short code from a returned short URL.
pub fn code_from_short_url(short_url: &str) -> String {
    short_url
        .strip_prefix(TEST_BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_else(|| panic!("unexpected short url {short_url}"))
        .to_string()
}

/// Shortens `long_url` through the API and returns the new code.
pub async fn shorten(server: &TestServer, long_url: &str) -> String {
    let response = server
        .post("/api/shorten")
        .json(&serde_json::json!({ "long_url": long_url }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    code_from_short_url(json["short_url"].as_str().unwrap())
}

pub async fn insert_link(pool: &PgPool, code: &str, url: &str) {
    let short_id: i64 =
        sqlx::query_scalar("INSERT INTO short_urls (short_code) VALUES ($1) RETURNING id")
            .bind(code)
            .fetch_one(pool)
            .await
            .unwrap();

    let long_id: i64 = sqlx::query_scalar("INSERT INTO long_urls (url) VALUES ($1) RETURNING id")
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap();

    sqlx::query("INSERT INTO url_links (long_url_id, short_url_id) VALUES ($1, $2)")
        .bind(long_id)
        .bind(short_id)
        .execute(pool)
        .await
        .unwrap();
}
