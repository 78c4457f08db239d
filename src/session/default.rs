//! The baseline session.
//!
//! [`DefaultSession`] issues an unauthenticated `GET` over HTTP/1.1 with an
//! empty header set, accepts only `200 OK`, and hands the raw response body
//! to the downloader. The client fills in `Host` from the URL.

use super::{response_reader, BodyReader, DownloadSession, StatusAction};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::{Method, Request, Response, StatusCode, Url, Version};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// Plain `GET` session used when no other session is configured.
///
/// The client is built from [`HttpClientConfig::default`] the first time it is
/// needed and reused for the lifetime of the session.
#[derive(Debug, Default)]
pub struct DefaultSession {
    client: OnceCell<ClientWithMiddleware>,
}

impl DefaultSession {
    /// Creates a new [`DefaultSession`].
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rejects URLs without a host.
///
/// `Host` itself is derived from the URL by the client on every hop, so a
/// redirect to another host never carries the original one along.
fn ensure_host(url: &Url) -> Result<()> {
    match url.host_str() {
        Some(_) => Ok(()),
        None => Err(Error::InvalidUrl(format!("The url \"{}\" has no host", url))),
    }
}

#[async_trait]
impl DownloadSession for DefaultSession {
    async fn client(&self) -> Result<ClientWithMiddleware> {
        let client = self
            .client
            .get_or_try_init(|| create_http_client(HttpClientConfig::default()))?;
        Ok(client.clone())
    }

    async fn request(&self, url: &Url) -> Result<Request> {
        ensure_host(url)?;

        let mut req = Request::new(Method::GET, url.clone());
        *req.version_mut() = Version::HTTP_11;
        Ok(req)
    }

    fn handle_status(&self, res: &Response) -> Result<StatusAction> {
        match res.status() {
            StatusCode::OK => Ok(StatusAction::Continue),
            status => {
                debug!("Rejecting {} with status {}", res.url(), status);
                Err(Error::BadStatus(status))
            }
        }
    }

    async fn body_reader(&self, res: Response) -> Result<BodyReader> {
        Ok(response_reader(res))
    }
}
