//! Importer configuration.

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{ConfigurationError, env_lookup, lookup_trimmed};

/// CSV file read when `IMPORT_FILE` is not set.
pub const DEFAULT_IMPORT_FILE: &str = "data.csv";

/// What to do with a data row that cannot be parsed or has too few fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Abort the import before anything is written.
    #[default]
    Fail,
    /// Log a warning and continue with the next row.
    Skip,
}

impl FromStr for MalformedRowPolicy {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "fail" | "abort" => Ok(Self::Fail),
            "skip" | "warn" => Ok(Self::Skip),
            _ => Err(ConfigurationError::InvalidValue {
                name: "IMPORT_MALFORMED_ROWS",
                value: value.to_string(),
            }),
        }
    }
}

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Path of the CSV file.
    pub file: PathBuf,
    /// Handling of malformed data rows.
    pub malformed_rows: MalformedRowPolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_IMPORT_FILE),
            malformed_rows: MalformedRowPolicy::default(),
        }
    }
}

impl ImportConfig {
    /// Reads `IMPORT_FILE` and `IMPORT_MALFORMED_ROWS` from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ImportConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(&env_lookup)
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `IMPORT_MALFORMED_ROWS`
    /// is not a recognized policy.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let file = lookup_trimmed(lookup, "IMPORT_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_IMPORT_FILE), PathBuf::from);
        let malformed_rows = match lookup_trimmed(lookup, "IMPORT_MALFORMED_ROWS") {
            Some(value) => value.parse()?,
            None => MalformedRowPolicy::default(),
        };

        Ok(Self {
            file,
            malformed_rows,
        })
    }
}
