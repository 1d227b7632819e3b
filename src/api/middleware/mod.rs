//! HTTP middleware for request processing.
//!
//! Provides CORS headers and request tracing.

pub mod cors;
pub mod tracing;
