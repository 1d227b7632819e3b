//! Link entity representing a shortened URL mapping.

/// A short code resolved through its link record to the long URL it points at.
///
/// `id` is the identifier of the short code row. A `Link` only exists when the
/// short code, link and long URL rows all join; a partial set of rows is
/// reported as "not found" by the repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub click_count: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, code: String, long_url: String, click_count: i64) -> Self {
        Self {
            id,
            code,
            long_url,
            click_count,
        }
    }
}

/// Input data for creating a new link.
///
/// `long_url` must already be validated and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
}

/// Store-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    pub total_links: i64,
    pub total_clicks: i64,
}
