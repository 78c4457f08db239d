//! A session for long-lived fetches into files.
//!
//! [`ResumableSession`] adds what a real image or artifact fetcher needs on
//! top of a plain `GET`:
//!
//! - a client configured through [`HttpClientConfig`] (retries, proxy,
//!   default headers, timeout)
//! - extra request headers
//! - resuming into a partially written sink with a `Range` request; a
//!   `416` whose `Content-Range` total equals the offset counts as complete
//! - ETag revalidation through `If-None-Match`, where `304 Not Modified`
//!   finishes the download without touching the sink
//! - an [`indicatif`] progress bar over the body
//!
//! # Example
//!
//! ```rust,no_run
//! use sluice::http::HttpClientConfig;
//! use sluice::progress::ProgressBarOpts;
//! use sluice::session::ResumableSession;
//! use sluice::DownloaderBuilder;
//! use tokio::fs::OpenOptions;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = reqwest::Url::parse("https://example.com/image.aci")?;
//! let mut file = OpenOptions::new()
//!     .create(true)
//!     .append(true)
//!     .open("image.aci")
//!     .await?;
//! let offset = file.metadata().await?.len();
//!
//! let session = ResumableSession::new(HttpClientConfig {
//!     retries: 3,
//!     ..HttpClientConfig::default()
//! })
//! .resume_from(offset)
//! .progress(ProgressBarOpts::with_pip_style());
//!
//! let downloader = DownloaderBuilder::new().session(session).build();
//! downloader.download(&url, &mut file).await?;
//! # Ok(())
//! # }
//! ```

use super::{response_reader, BodyReader, DownloadSession, StatusAction};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::ProgressBarOpts;
use crate::utils::content_length::{expected_total, parse_content_range_total};

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::{
    header::{HeaderMap, HeaderValue, IntoHeaderName, CONTENT_RANGE, IF_NONE_MATCH, RANGE},
    Method, Request, Response, StatusCode, Url,
};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::debug;

/// Session supporting extra headers, range resume and ETag revalidation.
#[derive(Default)]
pub struct ResumableSession {
    client_config: HttpClientConfig,
    client: OnceCell<ClientWithMiddleware>,
    headers: HeaderMap,
    offset: u64,
    etag: Option<HeaderValue>,
    progress: Option<ProgressBarOpts>,
}

impl fmt::Debug for ResumableSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumableSession")
            .field("client_config", &self.client_config)
            .field("headers", &self.headers)
            .field("offset", &self.offset)
            .field("etag", &self.etag)
            .field("progress", &self.progress)
            .finish()
    }
}

impl ResumableSession {
    /// Creates a session whose client is built from `client_config`.
    pub fn new(client_config: HttpClientConfig) -> Self {
        Self {
            client_config,
            ..Self::default()
        }
    }

    /// Add the http headers sent with the request.
    ///
    /// Can be called multiple times, all maps are merged.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a single http header sent with the request.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Number of bytes the sink already holds.
    ///
    /// A non-zero offset turns the request into `Range: bytes=<offset>-`.
    pub fn resume_from(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Entity tag of the copy the caller already has.
    ///
    /// Sent as `If-None-Match`; a `304 Not Modified` answer stops the
    /// download successfully without writing anything.
    pub fn etag(mut self, etag: HeaderValue) -> Self {
        self.etag = Some(etag);
        self
    }

    /// Show a progress bar while the body is copied.
    pub fn progress(mut self, opts: ProgressBarOpts) -> Self {
        self.progress = Some(opts);
        self
    }

    /// Gets the resume offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Gets the extra headers.
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn is_resuming(&self) -> bool {
        self.offset > 0
    }

    /// A `416` only means "done" when the remote size matches the sink.
    fn is_complete(&self, res: &Response) -> bool {
        self.is_resuming()
            && res
                .headers()
                .get(CONTENT_RANGE)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_content_range_total)
                == Some(self.offset)
    }
}

#[async_trait]
impl DownloadSession for ResumableSession {
    async fn client(&self) -> Result<ClientWithMiddleware> {
        let client = self
            .client
            .get_or_try_init(|| create_http_client(self.client_config.clone()))?;
        Ok(client.clone())
    }

    async fn request(&self, url: &Url) -> Result<Request> {
        let mut req = Request::new(Method::GET, url.clone());
        let headers = req.headers_mut();
        headers.extend(self.headers.clone());

        if self.is_resuming() {
            debug!("Resuming {} from byte {}", url, self.offset);
            let range = HeaderValue::from_str(&format!("bytes={}-", self.offset))
                .map_err(|e| Error::Internal(format!("invalid range header: {}", e)))?;
            headers.insert(RANGE, range);
        }

        if let Some(ref etag) = self.etag {
            headers.insert(IF_NONE_MATCH, etag.clone());
        }

        Ok(req)
    }

    fn handle_status(&self, res: &Response) -> Result<StatusAction> {
        match res.status() {
            StatusCode::OK if self.is_resuming() => Err(Error::ResumeRejected {
                url: res.url().to_string(),
            }),
            StatusCode::OK => Ok(StatusAction::Continue),
            StatusCode::PARTIAL_CONTENT if self.is_resuming() => Ok(StatusAction::Continue),
            StatusCode::NOT_MODIFIED if self.etag.is_some() => {
                debug!("{} has not been modified", res.url());
                Ok(StatusAction::Stop)
            }
            StatusCode::RANGE_NOT_SATISFIABLE if self.is_complete(res) => {
                debug!("{} was already fully downloaded", res.url());
                Ok(StatusAction::Stop)
            }
            status => Err(Error::BadStatus(status)),
        }
    }

    async fn body_reader(&self, res: Response) -> Result<BodyReader> {
        let Some(opts) = self.progress.clone() else {
            return Ok(response_reader(res));
        };

        let pb = match expected_total(&res, self.offset) {
            Some(total) => opts.to_progress_bar(total),
            None => opts.to_progress_bar(0),
        };
        pb.set_position(self.offset);
        pb.set_message(res.url().to_string());

        Ok(Box::new(pb.wrap_async_read(response_reader(res))))
    }
}
