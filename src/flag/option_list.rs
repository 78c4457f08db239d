//! Comma-separated option list flag values.

use crate::error::{Error, Result};

use std::collections::HashSet;
use std::fmt;

/// A flag value holding a case-insensitive, duplicate-free list of options
/// taken from a fixed permitted set.
///
/// ```rust
/// use sluice::flag::OptionList;
///
/// let mut insecure = OptionList::new(&["none", "http", "https"], "http")?;
/// assert_eq!(insecure.options(), ["http"]);
///
/// insecure.set("HTTPS,HTTP")?;
/// assert_eq!(insecure.to_string(), "https,http");
/// # Ok::<(), sluice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct OptionList {
    options: Vec<String>,
    all_options: Vec<String>,
    permissible: HashSet<String>,
}

impl OptionList {
    const TYPE_NAME: &'static str = "optionList";

    /// Creates an option list from its permitted tokens and the default value.
    ///
    /// Fails when `default_options` is not itself a valid value.
    pub fn new<S: AsRef<str>>(permissible_options: &[S], default_options: &str) -> Result<Self> {
        let all_options: Vec<String> = permissible_options
            .iter()
            .map(|o| o.as_ref().to_string())
            .collect();
        let permissible = all_options.iter().cloned().collect();

        let mut list = Self {
            options: Vec::new(),
            all_options,
            permissible,
        };
        list.set(default_options)
            .map_err(|e| Error::InvalidDefaultOptions {
                source: Box::new(e),
            })?;

        Ok(list)
    }

    /// Replaces the current options with the comma-separated list `s`.
    ///
    /// Tokens are matched case-insensitively. An empty string clears the list.
    /// On error the previous options are kept: the list is never left
    /// partially updated.
    pub fn set(&mut self, s: &str) -> Result<()> {
        if s.is_empty() {
            self.options.clear();
            return Ok(());
        }

        let mut options = Vec::new();
        let mut seen = HashSet::new();
        for option in s.to_lowercase().split(',') {
            if !self.permissible.contains(option) {
                return Err(Error::UnknownOption(option.to_string()));
            }
            if !seen.insert(option.to_string()) {
                return Err(Error::DuplicatedOption(option.to_string()));
            }
            options.push(option.to_string());
        }

        self.options = options;
        Ok(())
    }

    /// The selected options, in the order they were given.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Return `true` if `option` is among the selected options.
    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Name of the value type, for help text.
    pub fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    /// All permitted options, quoted and comma separated, for help text.
    pub fn permissible_string(&self) -> String {
        format!("\"{}\"", self.all_options.join("\", \""))
    }
}

impl fmt::Display for OptionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.options.join(","))
    }
}
