//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Long URL validation and normalization

pub mod code_generator;
pub mod url_validator;
