//! Session strategies controlling a single download.
//!
//! A [`DownloadSession`] makes every HTTP-specific decision of a download:
//! which client to use, how the request looks, whether the response status is
//! acceptable, and which byte stream to copy from. The
//! [`Downloader`](crate::Downloader) only drives these steps and performs the
//! copy and the final sync itself.
//!
//! Two sessions ship with the crate:
//!
//! - [`DefaultSession`] - plain `GET`, only `200 OK` is accepted, raw body
//! - [`ResumableSession`] - extra headers, range resume, ETag revalidation
//!   and a progress bar
//!
//! # Writing a session
//!
//! ```rust
//! use async_trait::async_trait;
//! use reqwest::header::{HeaderValue, AUTHORIZATION};
//! use reqwest::{Request, Response, Url};
//! use reqwest_middleware::ClientWithMiddleware;
//! use sluice::session::{BodyReader, DefaultSession, DownloadSession, StatusAction};
//! use sluice::Result;
//!
//! struct TokenSession {
//!     inner: DefaultSession,
//!     token: String,
//! }
//!
//! #[async_trait]
//! impl DownloadSession for TokenSession {
//!     async fn client(&self) -> Result<ClientWithMiddleware> {
//!         self.inner.client().await
//!     }
//!
//!     async fn request(&self, url: &Url) -> Result<Request> {
//!         let mut req = self.inner.request(url).await?;
//!         let value = format!("Bearer {}", self.token)
//!             .parse::<HeaderValue>()
//!             .map_err(sluice::Error::session)?;
//!         req.headers_mut().insert(AUTHORIZATION, value);
//!         Ok(req)
//!     }
//!
//!     fn handle_status(&self, res: &Response) -> Result<StatusAction> {
//!         self.inner.handle_status(res)
//!     }
//!
//!     async fn body_reader(&self, res: Response) -> Result<BodyReader> {
//!         self.inner.body_reader(res).await
//!     }
//! }
//! ```

pub mod default;
pub mod resumable;

pub use default::DefaultSession;
pub use resumable::ResumableSession;

use crate::error::Result;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{Request, Response, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::io;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

/// Byte stream a download copies from.
pub type BodyReader = Box<dyn AsyncRead + Send + Unpin>;

/// What to do after the response status has been inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// Read the body and copy it into the sink.
    Continue,
    /// Finish successfully without reading the body.
    Stop,
}

/// Pluggable policy controlling one download.
///
/// Every method is invoked once per download. An error returned by any of them
/// aborts the download and is handed to the caller unchanged.
#[async_trait]
pub trait DownloadSession: Send + Sync {
    /// Returns the client used to execute the request.
    ///
    /// A good place to set up redirect handling, timeouts or retries.
    async fn client(&self) -> Result<ClientWithMiddleware>;

    /// Builds the request for `url`. A good place to add headers.
    async fn request(&self, url: &Url) -> Result<Request>;

    /// Inspects the response before its body is read.
    ///
    /// Returning [`StatusAction::Stop`] or an error skips the body entirely.
    fn handle_status(&self, res: &Response) -> Result<StatusAction>;

    /// Returns the reader the body is copied from.
    async fn body_reader(&self, res: Response) -> Result<BodyReader>;
}

/// Turns the response body into a [`BodyReader`].
///
/// The response is consumed, so dropping the returned reader releases the
/// underlying connection.
pub fn response_reader(res: Response) -> BodyReader {
    let stream = Box::pin(res.bytes_stream().map_err(io::Error::other));
    Box::new(StreamReader::new(stream))
}
