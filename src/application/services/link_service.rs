//! Link creation and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, warn};

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH, generate_code, is_reserved,
};
use crate::utils::url_validator::{contains_control_chars, validate_url};

/// Default number of codes tried before giving up on collisions.
pub const DEFAULT_CODE_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating, expanding and following shortened links.
///
/// Owns the code-generation policy and composes public short URLs from the
/// configured base URL. Storage is reached only through [`LinkRepository`].
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    base_url: String,
    code_length: usize,
    max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service with the default code policy.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            link_repository,
            base_url,
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_CODE_GENERATION_ATTEMPTS,
        }
    }

    /// Overrides the generated code length and the number of collision attempts.
    ///
    /// `code_length` is clamped to `MIN_CODE_LENGTH..=MAX_CODE_LENGTH` and
    /// `max_attempts` to at least one.
    pub fn with_code_policy(mut self, code_length: usize, max_attempts: usize) -> Self {
        self.code_length = code_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Validates `long_url`, stores it under a freshly generated code and
    /// returns the new link.
    ///
    /// # Code Generation
    ///
    /// A unique violation on the short code triggers regeneration, up to the
    /// configured number of attempts. Any other storage error is returned
    /// immediately without retrying.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is blank or malformed.
    /// Returns [`AppError::Internal`] if randomness or storage fails, or if
    /// every attempt collided.
    pub async fn create_short_link(&self, long_url: &str) -> Result<Link, AppError> {
        let normalized_url = validate_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL provided", json!({ "reason": e.to_string() }))
        })?;

        let retries = FixedInterval::from_millis(0).take(self.max_attempts - 1);

        RetryIf::spawn(
            retries,
            || self.insert_with_fresh_code(&normalized_url),
            |e: &AppError| {
                let collided = e.is_short_code_conflict();
                if collided {
                    warn!("Short code collision, regenerating");
                }
                collided
            },
        )
        .await
        .map_err(|e| {
            if e.is_short_code_conflict() {
                AppError::internal(
                    "Failed to generate unique code",
                    json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
                )
            } else {
                e
            }
        })
    }

    /// Looks up a short code without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))
    }

    /// Looks up a short code and then counts a click on it.
    ///
    /// The lookup and the increment are separate statements. A failed
    /// increment is logged and does not fail the call. A stored URL that
    /// cannot be redirected to is rejected before the click is counted.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`]. Returns [`AppError::Internal`] if the stored URL
    /// holds control characters.
    pub async fn resolve_and_increment(&self, code: &str) -> Result<String, AppError> {
        let link = self.resolve(code).await?;

        if contains_control_chars(&link.long_url) {
            return Err(AppError::internal(
                "Stored URL is not a valid redirect target",
                json!({ "code": code }),
            ));
        }

        match self.link_repository.increment_clicks(code).await {
            Ok(true) => debug!(code, "Click recorded"),
            Ok(false) => warn!(code, "Short code disappeared before its click was recorded"),
            Err(e) => warn!(code, error = %e, details = %e.details(), "Failed to record click"),
        }

        Ok(link.long_url)
    }

    /// Constructs the full short URL from the base URL and a code.
    pub fn get_short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Checks that the backing store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Returns store-wide link and click totals.
    pub async fn summary(&self) -> Result<LinkSummary, AppError> {
        self.link_repository.summary().await
    }

    async fn insert_with_fresh_code(&self, normalized_url: &str) -> Result<Link, AppError> {
        let code = self.fresh_code()?;

        self.link_repository
            .create(NewLink {
                code,
                long_url: normalized_url.to_string(),
            })
            .await
    }

    fn fresh_code(&self) -> Result<String, AppError> {
        loop {
            let code = generate_code(self.code_length).map_err(|e| {
                AppError::internal(
                    "Failed to generate short code",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            if !is_reserved(&code) {
                return Ok(code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::SHORT_CODE_UNIQUE_CONSTRAINT;

    const BASE_URL: &str = "http://localhost:8080";

    fn collision() -> AppError {
        AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": SHORT_CODE_UNIQUE_CONSTRAINT }),
        )
    }

    fn service(repo: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(repo), BASE_URL)
    }

    #[tokio::test]
    async fn test_create_short_link_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.long_url == "https://example.com/page" && new_link.code.len() == 6
            })
            .times(1)
            .returning(|new_link| Ok(Link::new(1, new_link.code, new_link.long_url, 0)));

        let link = service(mock_repo)
            .create_short_link("example.com/page")
            .await
            .unwrap();

        assert_eq!(link.long_url, "https://example.com/page");
        assert_eq!(link.code.len(), 6);
        assert_eq!(link.click_count, 0);
    }

    #[tokio::test]
    async fn test_create_short_link_custom_code_length() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Ok(Link::new(1, new_link.code, new_link.long_url, 0)));

        let link = service(mock_repo)
            .with_code_policy(10, 3)
            .create_short_link("https://example.com")
            .await
            .unwrap();

        assert_eq!(link.code.len(), 10);
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url_never_touches_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo).create_short_link("   ").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut calls = 0;

        mock_repo.expect_create().times(3).returning(move |new_link| {
            calls += 1;
            if calls < 3 {
                Err(collision())
            } else {
                Ok(Link::new(3, new_link.code, new_link.long_url, 0))
            }
        });

        let link = service(mock_repo)
            .create_short_link("https://example.com")
            .await
            .unwrap();

        assert_eq!(link.id, 3);
    }

    #[tokio::test]
    async fn test_create_short_link_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(3)
            .returning(|_| Err(collision()));

        let result = service(mock_repo)
            .with_code_policy(6, 3)
            .create_short_link("https://example.com")
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Failed to generate unique code");
    }

    #[tokio::test]
    async fn test_create_short_link_does_not_retry_other_failures() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock_repo)
            .create_short_link("https://example.com")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| {
                Ok(Some(Link::new(
                    1,
                    code.to_string(),
                    "https://example.com".to_string(),
                    7,
                )))
            });
        mock_repo.expect_increment_clicks().times(0);

        let link = service(mock_repo).resolve("abc123").await.unwrap();

        assert_eq!(link.long_url, "https://example.com");
        assert_eq!(link.click_count, 7);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_storage_failure_is_internal() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock_repo).resolve("abc123").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_and_increment_counts_click() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(Link::new(
                1,
                code.to_string(),
                "https://example.com".to_string(),
                0,
            )))
        });
        mock_repo
            .expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        let url = service(mock_repo)
            .resolve_and_increment("abc123")
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_and_increment_ignores_increment_failure() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(Link::new(
                1,
                code.to_string(),
                "https://example.com".to_string(),
                0,
            )))
        });
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let url = service(mock_repo)
            .resolve_and_increment("abc123")
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_and_increment_unknown_code_skips_increment() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_increment_clicks().times(0);

        let result = service(mock_repo).resolve_and_increment("nope").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_and_increment_rejects_unredirectable_url_before_counting() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(Link::new(
                1,
                code.to_string(),
                "https://example.com/a\nb".to_string(),
                0,
            )))
        });
        mock_repo.expect_increment_clicks().times(0);

        let result = service(mock_repo).resolve_and_increment("abc123").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_rejects_control_characters() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo).create_short_link("a.com/x\ny").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_code_policy_clamps_length() {
        for (requested, expected) in [
            (0, MIN_CODE_LENGTH),
            (2, MIN_CODE_LENGTH),
            (100, MAX_CODE_LENGTH),
        ] {
            let mut mock_repo = MockLinkRepository::new();
            mock_repo
                .expect_create()
                .times(1)
                .returning(|new_link| Ok(Link::new(1, new_link.code, new_link.long_url, 0)));

            let link = service(mock_repo)
                .with_code_policy(requested, 1)
                .create_short_link("example.com")
                .await
                .unwrap();

            assert_eq!(link.code.len(), expected, "requested {requested}");
        }
    }

    #[test]
    fn test_get_short_url_trims_trailing_slash() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()), "https://s.test/");
        assert_eq!(service.get_short_url("abc123"), "https://s.test/abc123");
    }

    #[test]
    fn test_get_short_url_default_base() {
        let service = service(MockLinkRepository::new());
        assert_eq!(service.get_short_url("xyz"), "http://localhost:8080/xyz");
    }
}
