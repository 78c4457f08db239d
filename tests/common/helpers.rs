#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use futures::StreamExt;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use sluice::session::{BodyReader, DefaultSession, DownloadSession, StatusAction};
use sluice::{Error, Result, WriteSyncer};
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncWrite;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// Common test constants
pub const TEST_BODY: &[u8] = b"abcdef";
pub const TEST_USER_AGENT: &str = "sluice-test-agent";
pub const BLOB_ETAG: &str = "\"blob-v1\"";
pub const BLOB_SIZE: usize = 64 * 1024;

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Deterministic content served by `/blob` and `/norange`
pub fn blob() -> Vec<u8> {
    (0..BLOB_SIZE).map(|i| (i % 251) as u8).collect()
}

/// URL pointing to a port nothing listens on
pub fn unused_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    Url::parse(&format!("http://{}/a", addr)).expect("Invalid URL")
}

// === Fixture HTTP server ===

/// In-process HTTP server serving the fixtures used by the tests
pub struct TestServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Starts the server on an ephemeral port
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/a", get(|| async { TEST_BODY }))
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route("/host", get(echo_host))
            .route("/version", get(echo_version))
            .route("/ua", get(echo_user_agent))
            .route("/redirect", get(|| async { Redirect::to("/a") }))
            .route("/cross-host", get(redirect_to_localhost))
            .route("/created", get(|| async { (StatusCode::CREATED, TEST_BODY) }))
            .route("/blob", get(serve_blob))
            .route("/norange", get(|| async { blob() }))
            .route("/truncated", get(truncated))
            .layer(middleware::from_fn_with_state(hits.clone(), count_hits));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            hits,
            _handle: handle,
        }
    }

    /// URL of `path` on this server
    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).expect("Invalid URL")
    }

    /// `host:port` of this server
    pub fn authority(&self) -> String {
        self.addr.to_string()
    }

    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(hits): State<Arc<AtomicUsize>>, req: Request, next: Next) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn echo_host(headers: HeaderMap) -> String {
    header_str(&headers, header::HOST)
}

async fn echo_user_agent(headers: HeaderMap) -> String {
    header_str(&headers, header::USER_AGENT)
}

async fn echo_version(req: Request) -> String {
    format!("{:?}", req.version())
}

/// Redirects to `/host` on the same port, addressed as `localhost`.
async fn redirect_to_localhost(headers: HeaderMap) -> Redirect {
    let host = header_str(&headers, header::HOST);
    let port = host.rsplit_once(':').map(|(_, port)| port).unwrap_or("80");
    Redirect::to(&format!("http://localhost:{}/host", port))
}

async fn serve_blob(headers: HeaderMap) -> Response {
    let body = blob();

    if headers
        .get(header::IF_NONE_MATCH)
        .map(|v| v == BLOB_ETAG)
        .unwrap_or(false)
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    let start = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("bytes="))
        .and_then(|v| v.strip_suffix('-'))
        .and_then(|v| v.parse::<usize>().ok());

    match start {
        Some(start) if start >= body.len() => (
            StatusCode::RANGE_NOT_SATISFIABLE,
            [(header::CONTENT_RANGE, format!("bytes */{}", body.len()))],
        )
            .into_response(),
        Some(start) => {
            let content_range = format!("bytes {}-{}/{}", start, body.len() - 1, body.len());
            (
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::ETAG, BLOB_ETAG.to_string()),
                    (header::CONTENT_RANGE, content_range),
                ],
                body[start..].to_vec(),
            )
                .into_response()
        }
        None => (
            StatusCode::OK,
            [(header::ETAG, BLOB_ETAG.to_string())],
            body,
        )
            .into_response(),
    }
}

async fn truncated() -> Response {
    // The pause lets the server flush the head and first chunk before failing.
    let head = futures::stream::once(async { Ok(Bytes::from_static(b"abc")) });
    let tail = futures::stream::once(async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Err(io::Error::other("connection reset"))
    });
    Body::from_stream(head.chain(tail)).into_response()
}

// === Sinks ===

/// In-memory sink counting syncs, optionally failing writes or syncs
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub data: Vec<u8>,
    pub syncs: usize,
    pub fail_sync: bool,
    pub fail_after: Option<usize>,
}

impl RecordingSink {
    /// Sink refusing writes past `limit` bytes
    pub fn failing_after(limit: usize) -> Self {
        Self {
            fail_after: Some(limit),
            ..Self::default()
        }
    }

    /// Sink whose sync always fails
    pub fn failing_sync() -> Self {
        Self {
            fail_sync: true,
            ..Self::default()
        }
    }
}

impl AsyncWrite for RecordingSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let room = match self.fail_after {
            Some(limit) => limit.saturating_sub(self.data.len()),
            None => buf.len(),
        };
        if room == 0 && !buf.is_empty() {
            return Poll::Ready(Err(io::Error::other("sink full")));
        }
        let n = room.min(buf.len());
        self.data.extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[async_trait]
impl WriteSyncer for RecordingSink {
    async fn sync(&mut self) -> io::Result<()> {
        self.syncs += 1;
        if self.fail_sync {
            return Err(io::Error::other("disk on fire"));
        }
        Ok(())
    }
}

// === Sessions ===

/// Capability methods of a session, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Client,
    Request,
    Status,
    Body,
}

/// Session delegating to [`DefaultSession`] that records every call and can
/// be told to fail at a given step or to stop after the status check
#[derive(Default)]
pub struct ScriptedSession {
    inner: DefaultSession,
    fail_at: Option<Step>,
    stop: bool,
    calls: Arc<Mutex<Vec<Step>>>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(step: Step) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    pub fn stopping() -> Self {
        Self {
            stop: true,
            ..Self::default()
        }
    }

    /// Handle on the recorded calls, usable after the session is moved
    pub fn calls(&self) -> Arc<Mutex<Vec<Step>>> {
        self.calls.clone()
    }

    fn enter(&self, step: Step) -> Result<()> {
        self.calls.lock().expect("poisoned").push(step);
        match self.fail_at {
            Some(fail) if fail == step => Err(Error::Internal(format!("{:?} failed", step))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DownloadSession for ScriptedSession {
    async fn client(&self) -> Result<ClientWithMiddleware> {
        self.enter(Step::Client)?;
        self.inner.client().await
    }

    async fn request(&self, url: &Url) -> Result<reqwest::Request> {
        self.enter(Step::Request)?;
        self.inner.request(url).await
    }

    fn handle_status(&self, res: &reqwest::Response) -> Result<StatusAction> {
        self.enter(Step::Status)?;
        if self.stop {
            return Ok(StatusAction::Stop);
        }
        self.inner.handle_status(res)
    }

    async fn body_reader(&self, res: reqwest::Response) -> Result<BodyReader> {
        self.enter(Step::Body)?;
        self.inner.body_reader(res).await
    }
}

/// Recorded calls of a scripted session
pub fn recorded(calls: &Arc<Mutex<Vec<Step>>>) -> Vec<Step> {
    calls.lock().expect("poisoned").clone()
}
