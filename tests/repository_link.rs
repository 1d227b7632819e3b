mod common;

use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        long_url: url.to_string(),
    }
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let link = repo
        .create(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.long_url, "https://example.com");
    assert_eq!(link.click_count, 0);

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 1);
}

#[sqlx::test]
async fn test_create_duplicate_code_rolls_back(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(new_link("dup", "https://first.example"))
        .await
        .unwrap();

    let err = repo
        .create(new_link("dup", "https://second.example"))
        .await
        .unwrap_err();

    assert!(err.is_short_code_conflict());

    let long_urls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM long_urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(long_urls, 1);

    let link = repo.find_by_code("dup").await.unwrap().unwrap();
    assert_eq!(link.long_url, "https://first.example");
}

#[sqlx::test]
async fn test_same_long_url_stored_twice(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(new_link("one", "https://example.com"))
        .await
        .unwrap();
    repo.create(new_link("two", "https://example.com"))
        .await
        .unwrap();

    let long_urls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM long_urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(long_urls, 2);
}

#[sqlx::test]
async fn test_find_by_code(pool: PgPool) {
    common::insert_link(&pool, "abc123", "https://example.com").await;

    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.find_by_code("abc123").await.unwrap();
    assert_eq!(link.unwrap().long_url, "https://example.com");

    let missing = repo.find_by_code("nonexistent").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_find_by_code_is_case_sensitive(pool: PgPool) {
    common::insert_link(&pool, "AbC", "https://example.com").await;

    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("abc").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    common::insert_link(&pool, "clicky", "https://example.com").await;

    let repo = PgLinkRepository::new(Arc::new(pool));

    for _ in 0..3 {
        assert!(repo.increment_clicks("clicky").await.unwrap());
    }

    let link = repo.find_by_code("clicky").await.unwrap().unwrap();
    assert_eq!(link.click_count, 3);

    assert!(!repo.increment_clicks("missing").await.unwrap());
}

#[sqlx::test]
async fn test_summary_and_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.ping().await.unwrap();

    let empty = repo.summary().await.unwrap();
    assert_eq!(empty.total_links, 0);
    assert_eq!(empty.total_clicks, 0);

    common::insert_link(&pool, "a1", "https://a.example").await;
    common::insert_link(&pool, "b2", "https://b.example").await;
    repo.increment_clicks("a1").await.unwrap();
    repo.increment_clicks("a1").await.unwrap();
    repo.increment_clicks("b2").await.unwrap();

    let summary = repo.summary().await.unwrap();
    assert_eq!(summary.total_links, 2);
    assert_eq!(summary.total_clicks, 3);
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    common::insert_link(&pool, "busy", "https://example.com").await;

    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("busy").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let link = repo.find_by_code("busy").await.unwrap().unwrap();
    assert_eq!(link.click_count, 25);
}
