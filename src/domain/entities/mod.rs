//! Core domain entities representing the business data model.
//!
//! - [`Link`] - A short code joined to the long URL it redirects to
//! - [`NewLink`] - Input for creating a short code, long URL and link in one go
//! - [`LinkSummary`] - Store-wide link and click totals

pub mod link;

pub use link::{Link, LinkSummary, NewLink};
