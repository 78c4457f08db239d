//! Image content hashes.

use crate::error::{Error, Result};

use std::fmt;
use std::str::FromStr;

/// A content hash of the form `<type>-<value>`, e.g. `sha512-7f3a...`.
///
/// Only `sha512` hashes are recognized. The value may be a prefix of the full
/// digest; the image store resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHash {
    typ: String,
    val: String,
}

impl ImageHash {
    /// Supported hash type.
    pub const SHA512: &'static str = "sha512";

    /// The hash algorithm.
    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// The (possibly abbreviated) hex digest.
    pub fn value(&self) -> &str {
        &self.val
    }
}

impl FromStr for ImageHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidHash {
            hash: s.to_string(),
            reason: reason.to_string(),
        };

        let mut elems = s.split('-');
        let (typ, val) = match (elems.next(), elems.next(), elems.next()) {
            (Some(typ), Some(val), None) => (typ, val),
            _ => return Err(invalid("expected exactly one '-' separator")),
        };

        match typ {
            Self::SHA512 => (),
            "" => return Err(invalid("unexpected empty hash")),
            other => return Err(invalid(&format!("unrecognized hash type: {}", other))),
        }
        if val.is_empty() {
            return Err(invalid("unexpected empty hash value"));
        }

        Ok(Self {
            typ: typ.to_string(),
            val: val.to_string(),
        })
    }
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.typ, self.val)
    }
}
