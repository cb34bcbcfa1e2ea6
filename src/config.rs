//! Environment configuration shared by both executables.
//!
//! Configuration structs expose a `from_lookup` constructor taking a
//! variable lookup function, and a `from_env` wrapper that reads the
//! process environment. Tests drive `from_lookup` with a map.

use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'postgres' or 'in_memory'")]
    InvalidStorageMode(String),

    /// A required variable is missing or empty.
    #[error("{0} environment variable is required")]
    MissingVariable(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// `DATABASE_URL` is not a valid `PostgreSQL` connection URL.
    #[error("Invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(String),
}

/// Reads `key` from the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Looks up `key`, treating empty and whitespace-only values as absent.
pub(crate) fn lookup_trimmed(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Looks up a variable that must be present.
pub(crate) fn lookup_required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigurationError> {
    lookup_trimmed(lookup, key).ok_or(ConfigurationError::MissingVariable(key))
}

#[cfg(test)]
pub(crate) fn map_lookup(
    pairs: &[(&str, &str)],
) -> impl Fn(&str) -> Option<String> + use<> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
