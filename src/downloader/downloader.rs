//! Core downloader implementation with fetch logic.
//!
//! This module contains the [`Downloader`] struct that drives a single fetch:
//! it asks its [`DownloadSession`] for a client and a request, executes the
//! request, lets the session validate the status and pick the body reader,
//! then copies the body into the sink and syncs it.
//!
//! # Session binding
//!
//! A downloader built without a session binds a [`DefaultSession`] the first
//! time it is used. The binding goes through a [`OnceCell`], so concurrent
//! first calls block until one of them has installed the session and all of
//! them observe the same instance. Once bound, the session is never replaced.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sluice::Downloader;
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = Downloader::new();
//! let url = Url::parse("https://example.com/file.zip")?;
//!
//! let mut body: Vec<u8> = Vec::new();
//! downloader.download(&url, &mut body).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::session::{DefaultSession, DownloadSession, StatusAction};
use crate::sink::WriteSyncer;

use once_cell::sync::OnceCell;
use reqwest::Url;
use std::fmt;
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// Represents the download controller.
///
/// A downloader can be created directly, or via its builder to plug in a
/// custom session:
///
/// ```rust
/// # fn main()  {
/// use sluice::{session::DefaultSession, DownloaderBuilder};
///
/// let d = DownloaderBuilder::new().session(DefaultSession::new()).build();
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Downloader {
    session: OnceCell<Arc<dyn DownloadSession>>,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("session_bound", &self.session.get().is_some())
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader which binds a [`DefaultSession`] on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new Downloader bound to `session`.
    pub(crate) fn with_session(session: Arc<dyn DownloadSession>) -> Self {
        Self {
            session: OnceCell::with_value(session),
        }
    }

    /// Gets the bound session, if any.
    ///
    /// Returns `None` until the first download of a downloader built without
    /// a session.
    pub fn session(&self) -> Option<&Arc<dyn DownloadSession>> {
        self.session.get()
    }

    fn ensure_session(&self) -> &Arc<dyn DownloadSession> {
        self.session.get_or_init(|| {
            debug!("No session configured, binding the default session");
            Arc::new(DefaultSession::new())
        })
    }

    /// Fetches `url` and writes its body into `out`.
    ///
    /// Errors returned by the session are passed through unchanged. Copy and
    /// sync failures are wrapped with the URL. On a copy failure `out` may
    /// hold a partial write; it is up to the caller to discard it.
    ///
    /// When the session decides to stop after inspecting the status, nothing
    /// is written, the sink is not synced, and `Ok(())` is returned.
    pub async fn download<W>(&self, url: &Url, out: &mut W) -> Result<()>
    where
        W: WriteSyncer + ?Sized,
    {
        let session = self.ensure_session();

        let client = session.client().await?;
        let req = session.request(url).await?;

        debug!("Fetching {}", url);
        let res = client.execute(req).await?;

        // The response is owned from here on: every return path drops it.
        if session.handle_status(&res)? == StatusAction::Stop {
            debug!("Session stopped {} before reading the body", url);
            return Ok(());
        }

        let mut reader = session.body_reader(res).await?;

        debug!("Retrieving body of {}", url);
        let copied = tokio::io::copy(&mut reader, &mut *out)
            .await
            .map_err(|source| Error::Copy {
                url: url.to_string(),
                source,
            })?;
        drop(reader);

        out.sync().await.map_err(|source| Error::Sync {
            url: url.to_string(),
            source,
        })?;

        debug!("Downloaded {} bytes from {}", copied, url);
        Ok(())
    }

    /// Fetches `url` into the file at `path`.
    ///
    /// Parent directories are created as needed and an existing file is
    /// truncated. Nothing is cleaned up if the download fails. For resumed or
    /// revalidated downloads, open the file yourself and call
    /// [`Downloader::download`].
    pub async fn download_to_file(&self, url: &Url, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            debug!("Creating destination directory {:?}", dir);
            fs::create_dir_all(dir).await?;
        }

        debug!("Creating destination file {:?}", path);
        let mut file = fs::File::create(path).await?;
        self.download(url, &mut file).await
    }
}
