//! Shared utility functions.
//!
//! - [`content_length`] - Resource size extraction from HTTP responses

pub mod content_length;

pub use content_length::{expected_total, parse_content_range_total};
