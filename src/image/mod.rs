//! Resolution of user supplied image references to image store keys.
//!
//! A reference is either a content hash (`sha512-...`, possibly abbreviated)
//! or an image name with labels (`example.com/app:1.0,os=linux`). The store
//! itself is abstracted behind [`ImageStore`].
//!
//! Both lookups keep a missing image distinguishable from other failures:
//! [`Error::ImageNotFound`] raised by the store is returned as is, while any
//! other store error is wrapped with the reference being resolved.
//!
//! # Examples
//!
//! ```rust
//! use sluice::image::{store_key_from_app_or_hash, ImageStore, Labels};
//! use sluice::{Error, Result};
//!
//! struct OneImage;
//!
//! impl ImageStore for OneImage {
//!     fn resolve_key(&self, key: &str) -> Result<String> {
//!         Err(Error::ImageNotFound(key.to_string()))
//!     }
//!
//!     fn get_aci(&self, name: &str, _labels: &Labels) -> Result<String> {
//!         match name {
//!             "busybox" => Ok("sha512-0123".to_string()),
//!             _ => Err(Error::ImageNotFound(name.to_string())),
//!         }
//!     }
//! }
//!
//! assert_eq!(store_key_from_app_or_hash(&OneImage, "busybox")?, "sha512-0123");
//! assert!(store_key_from_app_or_hash(&OneImage, "sha512-ff")
//!     .unwrap_err()
//!     .is_not_found());
//! # Ok::<(), Error>(())
//! ```

pub mod app;
pub mod hash;

pub use app::{validate_labels, AppName, Labels};
pub use hash::ImageHash;

use crate::error::{Error, Result};

use tracing::debug;

/// Lookups an image store must provide to resolve image references.
///
/// Implementations report a missing image with [`Error::ImageNotFound`].
pub trait ImageStore {
    /// Resolves a full or abbreviated image hash to its store key.
    fn resolve_key(&self, key: &str) -> Result<String>;

    /// Finds the store key of the image called `name` carrying `labels`.
    fn get_aci(&self, name: &str, labels: &Labels) -> Result<String>;
}

/// Resolves an image name with labels to a store key.
pub fn store_key_from_app<S>(store: &S, image: &str) -> Result<String>
where
    S: ImageStore + ?Sized,
{
    let app: AppName = image.parse()?;
    validate_labels(app.labels()).map_err(|reason| Error::InvalidLabels {
        image: image.to_string(),
        reason,
    })?;

    debug!("Looking up image {} with labels {:?}", app.name(), app.labels());
    store
        .get_aci(app.name(), app.labels())
        .map_err(|e| match e {
            Error::ImageNotFound(_) => e,
            other => Error::ImageLookup {
                image: image.to_string(),
                source: Box::new(other),
            },
        })
}

/// Resolves either an image hash or an image name to a store key.
pub fn store_key_from_app_or_hash<S>(store: &S, input: &str) -> Result<String>
where
    S: ImageStore + ?Sized,
{
    match input.parse::<ImageHash>() {
        Ok(hash) => {
            debug!("Resolving image ID {}", hash);
            store.resolve_key(input).map_err(|e| match e {
                Error::ImageNotFound(_) => e,
                other => Error::ResolveImageId {
                    source: Box::new(other),
                },
            })
        }
        Err(_) => store_key_from_app(store, input),
    }
}
