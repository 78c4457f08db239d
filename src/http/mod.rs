//! HTTP module containing HTTP client functionality.
//!
//! This module provides client construction for sessions. It handles client
//! creation with tracing, optional retry logic, proxy support, default headers
//! and a request timeout.
//!
//! - [`client`] - HTTP client creation and middleware configuration

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
