//! Example fetching a single URL into a file.
//!
//! ```sh
//! RUST_LOG=sluice=debug cargo run --example fetch -- https://httpbin.org/bytes/4096 out.bin
//! ```

use color_eyre::{eyre::eyre, Result};
use reqwest::Url;
use sluice::progress::ProgressBarOpts;
use sluice::session::ResumableSession;
use sluice::{DownloaderBuilder, HttpClientConfig};
use tokio::fs::OpenOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (url, path) = match (args.next(), args.next()) {
        (Some(url), Some(path)) => (Url::parse(&url)?, path),
        _ => return Err(eyre!("usage: fetch <url> <path>")),
    };

    // Pick up where a previous run left off.
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    let offset = file.metadata().await?.len();

    let session = ResumableSession::new(HttpClientConfig {
        retries: 3,
        ..HttpClientConfig::default()
    })
    .resume_from(offset)
    .progress(ProgressBarOpts::with_pip_style());

    let downloader = DownloaderBuilder::new().session(session).build();
    downloader.download(&url, &mut file).await?;

    println!("Saved {} to {}", url, path);
    Ok(())
}
