//! End-to-end downloads into files.

use sluice::{Downloader, Error};

mod common;
use common::helpers::*;

#[tokio::test]
async fn test_download_to_file_creates_parent_directories() {
    let server = TestServer::start().await;
    let dir = create_temp_dir();
    let path = dir.path().join("images").join("nested").join("blob.bin");

    Downloader::new()
        .download_to_file(&server.url("/blob"), &path)
        .await
        .expect("download failed");

    assert_eq!(std::fs::read(&path).unwrap(), blob());
}

#[tokio::test]
async fn test_download_to_file_overwrites_existing_file() {
    let server = TestServer::start().await;
    let dir = create_temp_dir();
    let path = dir.path().join("a.txt");
    std::fs::write(&path, b"stale content that is longer than the body").unwrap();

    Downloader::new()
        .download_to_file(&server.url("/a"), &path)
        .await
        .expect("download failed");

    assert_eq!(std::fs::read(&path).unwrap(), TEST_BODY);
}

#[tokio::test]
async fn test_failed_download_leaves_empty_file() {
    let server = TestServer::start().await;
    let dir = create_temp_dir();
    let path = dir.path().join("missing.bin");

    let err = Downloader::new()
        .download_to_file(&server.url("/missing"), &path)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BadStatus(_)));
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}

#[tokio::test]
async fn test_downloads_into_file_handle() {
    let server = TestServer::start().await;
    let dir = create_temp_dir();
    let path = dir.path().join("handle.bin");
    let mut file = tokio::fs::File::create(&path).await.unwrap();

    Downloader::new()
        .download(&server.url("/blob"), &mut file)
        .await
        .expect("download failed");
    drop(file);

    assert_eq!(std::fs::read(&path).unwrap(), blob());
}
