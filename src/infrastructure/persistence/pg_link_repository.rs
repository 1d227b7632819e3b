//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository over the `short_urls`, `long_urls` and `url_links` tables.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    url: String,
    click_count: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.short_code, r.url, r.click_count)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        // Dropping the transaction without commit rolls back every insert below.
        let mut tx = self.pool.begin().await?;

        let short_url_id: i64 = sqlx::query_scalar(
            "INSERT INTO short_urls (short_code, click_count) VALUES ($1, 0) RETURNING id",
        )
        .bind(&new_link.code)
        .fetch_one(&mut *tx)
        .await?;

        let long_url_id: i64 =
            sqlx::query_scalar("INSERT INTO long_urls (url) VALUES ($1) RETURNING id")
                .bind(&new_link.long_url)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query("INSERT INTO url_links (long_url_id, short_url_id) VALUES ($1, $2)")
            .bind(long_url_id)
            .bind(short_url_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Link::new(short_url_id, new_link.code, new_link.long_url, 0))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT s.id, s.short_code, l.url, s.click_count
            FROM short_urls s
            JOIN url_links ul ON s.id = ul.short_url_id
            JOIN long_urls l ON l.id = ul.long_url_id
            WHERE s.short_code = $1
            ORDER BY ul.id
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE short_urls SET click_count = click_count + 1 WHERE short_code = $1")
                .bind(code)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn summary(&self) -> Result<LinkSummary, AppError> {
        let (total_links, total_clicks) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM url_links),
                (SELECT COALESCE(SUM(click_count), 0)::BIGINT FROM short_urls)
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(LinkSummary {
            total_links,
            total_clicks,
        })
    }
}
