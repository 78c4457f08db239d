//! Sluice is a pluggable HTTP fetch pipeline: it retrieves a resource and
//! writes its body into a durable sink, while a session decides everything
//! HTTP-specific.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reqwest::Url;
//! use sluice::{Downloader, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let url = Url::parse("https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip")
//!     .map_err(|e| Error::InvalidUrl(e.to_string()))?;
//! let downloader = Downloader::new();
//! downloader.download_to_file(&url, "output/reqwest.zip").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`downloader`] - The [`Downloader`] driving a fetch and its builder
//! - [`session`] - The [`DownloadSession`] trait and the shipped sessions
//! - [`sink`] - The [`WriteSyncer`] output sink contract
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction for sessions
//! - [`progress`] - Progress bar styling
//! - [`utils`] - Shared utility functions
//! - [`flag`] - Validated option list flag values
//! - [`image`] - Image reference to store key resolution

pub mod downloader;
pub mod error;
pub mod flag;
pub mod http;
pub mod image;
pub mod progress;
pub mod session;
pub mod sink;
pub mod utils;

pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::ProgressBarOpts;
pub use session::{DefaultSession, DownloadSession, ResumableSession, StatusAction};
pub use sink::WriteSyncer;
