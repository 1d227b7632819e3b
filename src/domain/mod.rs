//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP or persistence layers.
//! Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
