//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod expand;
pub mod health;
pub mod preflight;
pub mod redirect;
pub mod shorten;

pub use expand::expand_handler;
pub use health::health_handler;
pub use preflight::{method_not_allowed_handler, preflight_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
