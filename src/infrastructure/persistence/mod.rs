//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryLinkRepository`] - Process-local storage used by the HTTP tests

pub mod in_memory_link_repository;
pub mod pg_link_repository;

pub use in_memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
