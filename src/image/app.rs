//! Image names with labels, as typed on a command line.
//!
//! The accepted syntax is `name[:version][,label=value]*`, for example
//! `example.com/app:1.0,os=linux,arch=amd64`. The optional `:version` suffix
//! is shorthand for a `version` label.

use crate::error::{Error, Result};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Image labels, sorted by name.
pub type Labels = BTreeMap<String, String>;

/// Operating systems and the architectures known for each of them.
const VALID_OS_ARCH: &[(&str, &[&str])] = &[
    ("freebsd", &["amd64", "i386", "arm"]),
    (
        "linux",
        &[
            "amd64",
            "i386",
            "aarch64",
            "aarch64_be",
            "armv6l",
            "armv7l",
            "armv7b",
            "ppc64",
            "ppc64le",
            "s390x",
        ],
    ),
];

/// An image name together with its labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppName {
    name: String,
    labels: Labels,
}

impl AppName {
    /// The image name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The labels, `version` included when given with `:`.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }
}

/// Return `true` if `s` matches `[a-z0-9]+([-._~/][a-z0-9]+)*`.
pub fn is_ac_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.split(['-', '.', '_', '~', '/']).all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Checks label names and the `os`/`arch` combination.
///
/// Returns a human readable reason on failure.
pub fn validate_labels(labels: &Labels) -> std::result::Result<(), String> {
    for name in labels.keys() {
        if name == "name" {
            return Err("invalid label name: \"name\"".to_string());
        }
        if !is_ac_identifier(name) {
            return Err(format!("invalid label name: {:?}", name));
        }
    }

    let Some(os) = labels.get("os") else {
        return Ok(());
    };
    let Some((_, archs)) = VALID_OS_ARCH.iter().find(|(valid, _)| valid == os) else {
        let oses: Vec<&str> = VALID_OS_ARCH.iter().map(|(valid, _)| *valid).collect();
        return Err(format!("bad os {:?} (must be one of: {:?})", os, oses));
    };
    match labels.get("arch") {
        Some(arch) if !archs.contains(&arch.as_str()) => Err(format!(
            "bad arch {:?} for {} (must be one of: {:?})",
            arch, os, archs
        )),
        _ => Ok(()),
    }
}

fn check_colon(app: &str) -> std::result::Result<(), String> {
    let first_comma = app.find(',');
    let first_colon = app.find(':');
    if let (Some(comma), Some(colon)) = (first_comma, first_colon) {
        if colon > comma {
            return Err("colon may appear only right after the app name".to_string());
        }
    }
    if app.matches(':').count() > 1 {
        return Err("colon may appear at most once".to_string());
    }
    Ok(())
}

impl FromStr for AppName {
    type Err = Error;

    fn from_str(app: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidImageName {
            image: app.to_string(),
            reason,
        };

        check_colon(app).map_err(invalid)?;
        let prepared = format!("name={}", app.replacen(':', ",version=", 1));

        let mut name = None;
        let mut labels = Labels::new();
        for part in prepared.split(',') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                invalid(format!("has a label without a value: {}", part))
            })?;

            if key == "name" {
                if name.replace(value.to_string()).is_some() {
                    return Err(invalid("name given more than once".to_string()));
                }
                continue;
            }
            if !is_ac_identifier(key) {
                return Err(invalid(format!("invalid label name: {:?}", key)));
            }
            if labels.insert(key.to_string(), value.to_string()).is_some() {
                return Err(invalid(format!("label {} with multiple values", key)));
            }
        }

        let name = name.unwrap_or_default();
        if !is_ac_identifier(&name) {
            return Err(invalid(format!("invalid image name: {:?}", name)));
        }

        Ok(Self { name, labels })
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (key, value) in &self.labels {
            write!(f, ",{}={}", key, value)?;
        }
        Ok(())
    }
}
