//! Process-local link repository used by the HTTP tests.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, SHORT_CODE_UNIQUE_CONSTRAINT};

#[derive(Debug, Clone)]
struct StoredLink {
    id: i64,
    long_url: String,
    click_count: i64,
}

/// Link repository backed by a sharded concurrent map.
///
/// Mirrors the PostgreSQL constraints that matter to callers: short codes are
/// unique and click increments are atomic per code. Data lives only as long as
/// the process.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, StoredLink>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": SHORT_CODE_UNIQUE_CONSTRAINT }),
            )),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                slot.insert(StoredLink {
                    id,
                    long_url: new_link.long_url.clone(),
                    click_count: 0,
                });
                Ok(Link::new(id, new_link.code, new_link.long_url, 0))
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|stored| {
            Link::new(
                stored.id,
                code.to_string(),
                stored.long_url.clone(),
                stored.click_count,
            )
        }))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        match self.links.get_mut(code) {
            Some(mut stored) => {
                stored.click_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn summary(&self) -> Result<LinkSummary, AppError> {
        let mut summary = LinkSummary::default();

        for stored in self.links.iter() {
            summary.total_links += 1;
            summary.total_clicks += stored.click_count;
        }

        Ok(summary)
    }
}
