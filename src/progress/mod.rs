//! Progress module containing progress bar functionality.
//!
//! Sessions that want to report progress wrap the response body in an
//! [`indicatif`] bar configured through [`ProgressBarOpts`].
//!
//! - `style` - Progress bar styling options and templates
//!
//! # Examples
//!
//! ```rust
//! use sluice::progress::ProgressBarOpts;
//! use sluice::session::ResumableSession;
//!
//! let session = ResumableSession::default().progress(ProgressBarOpts::with_pip_style());
//! ```

pub(crate) mod style;

pub use style::ProgressBarOpts;
