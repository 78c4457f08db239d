//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ## Default Session
//!
//! ```rust
//! use sluice::DownloaderBuilder;
//!
//! // Binds a DefaultSession on the first download.
//! let downloader = DownloaderBuilder::new().build();
//! assert!(downloader.session().is_none());
//! ```
//!
//! ## Custom Session
//!
//! ```rust
//! use sluice::http::HttpClientConfig;
//! use sluice::session::ResumableSession;
//! use sluice::DownloaderBuilder;
//! use reqwest::header::{HeaderValue, USER_AGENT};
//!
//! let session = ResumableSession::new(HttpClientConfig::default())
//!     .header(USER_AGENT, HeaderValue::from_static("sluice/0.1"));
//!
//! let downloader = DownloaderBuilder::new().session(session).build();
//! assert!(downloader.session().is_some());
//! ```

use super::downloader::Downloader;
use crate::session::DownloadSession;

use std::sync::Arc;

/// A builder used to create a [`Downloader`].
#[derive(Default)]
pub struct DownloaderBuilder {
    session: Option<Arc<dyn DownloadSession>>,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Set the session controlling the downloads.
    pub fn session<S>(mut self, session: S) -> Self
    where
        S: DownloadSession + 'static,
    {
        self.session = Some(Arc::new(session));
        self
    }

    /// Set a session shared with other downloaders.
    pub fn shared_session(mut self, session: Arc<dyn DownloadSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    ///
    /// A configured session is bound immediately; otherwise the downloader
    /// binds a [`DefaultSession`](crate::session::DefaultSession) on first use.
    pub fn build(self) -> Downloader {
        match self.session {
            Some(session) => Downloader::with_session(session),
            None => Downloader::new(),
        }
    }
}
