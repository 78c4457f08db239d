//! Error handling for the sluice library.
//!
//! This module provides centralized error handling for every stage of a
//! download (client construction, request execution, status validation,
//! body transfer and the final durability barrier) as well as for the
//! option-list and image-resolution helpers.
//!
//! Errors returned by a [`DownloadSession`](crate::session::DownloadSession)
//! are handed back to the caller unchanged. Only the copy and sync stages,
//! which the [`Downloader`](crate::Downloader) performs itself, wrap their
//! I/O errors with the URL being fetched.

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using sluice.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// This variant captures internal errors that don't fit into other categories.
    /// Custom sessions may also use it for ad-hoc failures.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Error raised by a custom session, passed through untouched.
    #[error(transparent)]
    Session(Box<dyn std::error::Error + Send + Sync>),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library, typically while building a client
    /// or a request.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// The request could not be executed (DNS, connection refused, timeout,
    /// TLS failure, or a middleware error).
    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The response status was rejected by the session.
    #[error("bad HTTP status code: {}", .0.as_u16())]
    BadStatus(StatusCode),

    /// The server answered a ranged request with the full body.
    ///
    /// The sink already holds a prefix of the resource, so the caller has to
    /// truncate it and start over.
    #[error("server ignored the range request for {url:?}, restart the download from scratch")]
    ResumeRejected { url: String },

    /// Copying the response body into the sink failed.
    ///
    /// The sink may contain a partial write.
    #[error("failed to download {url:?}: {source}")]
    Copy {
        url: String,
        #[source]
        source: io::Error,
    },

    /// Syncing the sink to durable storage failed.
    #[error("failed to sync data from {url:?} to disk: {source}")]
    Sync {
        url: String,
        #[source]
        source: io::Error,
    },

    /// An option list token is not part of the permitted set.
    #[error("unknown option {0:?}")]
    UnknownOption(String),

    /// An option list token was given more than once.
    #[error("duplicated option {0:?}")]
    DuplicatedOption(String),

    /// The default value of an option list is itself invalid.
    #[error("problem setting defaults: {source}")]
    InvalidDefaultOptions { source: Box<Error> },

    /// The string is not a valid image hash.
    #[error("badly formatted hash string {hash:?}: {reason}")]
    InvalidHash { hash: String, reason: String },

    /// The image name could not be parsed.
    #[error("cannot parse the image name {image:?}: {reason}")]
    InvalidImageName { image: String, reason: String },

    /// The labels attached to an image name are not valid.
    #[error("invalid labels in the image {image:?}: {reason}")]
    InvalidLabels { image: String, reason: String },

    /// The image store holds no image matching the request.
    #[error("image {0:?} not found")]
    ImageNotFound(String),

    /// The image store failed to look up an image by name and labels.
    #[error("cannot find image {image:?}: {source}")]
    ImageLookup { image: String, source: Box<Error> },

    /// The image store failed to resolve an image ID.
    #[error("cannot resolve image ID: {source}")]
    ResolveImageId { source: Box<Error> },
}

impl Error {
    /// Wrap a foreign error raised inside a custom session.
    pub fn session<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Session(err.into())
    }

    /// Return `true` if the error means the requested image does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ImageNotFound(_))
    }
}

/// Result type alias for operations that can fail with a sluice error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_mentions_code() {
        let err = Error::BadStatus(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "bad HTTP status code: 404");
    }

    #[test]
    fn test_copy_error_names_url() {
        let err = Error::Copy {
            url: "http://example.test/a".into(),
            source: io::Error::other("boom"),
        };
        assert_eq!(
            err.to_string(),
            "failed to download \"http://example.test/a\": boom"
        );
    }

    #[test]
    fn test_session_error_is_transparent() {
        let err = Error::session("no credentials");
        assert_eq!(err.to_string(), "no credentials");
    }
}
