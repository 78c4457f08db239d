//! Downloader module containing the download orchestration and its builder.
//!
//! - `downloader` - Core Downloader struct with the fetch-and-copy logic
//! - `builder` - DownloaderBuilder to plug in a session
//!
//! # Examples
//!
//! ```rust,no_run
//! use sluice::DownloaderBuilder;
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().build();
//! let url = Url::parse("https://example.com/file.zip")?;
//! downloader.download_to_file(&url, "downloads/file.zip").await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use downloader::Downloader;
