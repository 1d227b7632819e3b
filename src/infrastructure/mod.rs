//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer.

pub mod persistence;
