//! Repository factory for runtime backend selection.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `postgres` (default) | `in_memory`
//! - `DATABASE_URL`: full `PostgreSQL` connection URL; overrides the `DB_*` variables
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS`, `DB_NAME`: connection parts
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repository = RepositoryFactory::new(config).create().await?;
//! ```

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use super::{BankRepository, InMemoryBankRepository, PostgresBankRepository};
use crate::config::{ConfigurationError, env_lookup, lookup_required, lookup_trimmed};

/// Port used when `DB_PORT` is not set.
pub const DEFAULT_DB_PORT: u16 = 5432;

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage backend for the `banks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// `PostgreSQL` storage.
    #[default]
    Postgres,
    /// Process-local storage. Contents are lost on exit.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// `PostgreSQL` connection settings.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// A full connection URL.
    Url(String),
    /// Individual connection parts.
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
    },
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(_) => formatter.debug_tuple("Url").field(&"<redacted>").finish(),
            Self::Parts {
                host,
                port,
                user,
                name,
                ..
            } => formatter
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &"<redacted>")
                .field("name", name)
                .finish(),
        }
    }
}

impl DatabaseConfig {
    /// Reads connection settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`DatabaseConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(&env_lookup)
    }

    /// Reads connection settings through `lookup`.
    ///
    /// `DATABASE_URL` wins when present. Otherwise `DB_HOST`, `DB_USER` and
    /// `DB_NAME` are required, `DB_PORT` defaults to 5432 and `DB_PASS` may
    /// be empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a required part is missing or
    /// `DB_PORT` is not a valid port number.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        if let Some(url) = lookup_trimmed(lookup, "DATABASE_URL") {
            return Ok(Self::Url(url));
        }

        let host = lookup_required(lookup, "DB_HOST")?;
        let port = match lookup_trimmed(lookup, "DB_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidValue {
                    name: "DB_PORT",
                    value,
                })?,
            None => DEFAULT_DB_PORT,
        };
        let user = lookup_required(lookup, "DB_USER")?;
        // Passwords are taken verbatim.
        let password = lookup("DB_PASS").unwrap_or_default();
        let name = lookup_required(lookup, "DB_NAME")?;

        Ok(Self::Parts {
            host,
            port,
            user,
            password,
            name,
        })
    }

    /// Builds `sqlx` connect options from these settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidDatabaseUrl` if the URL cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigurationError> {
        match self {
            Self::Url(url) => PgConnectOptions::from_str(url)
                .map_err(|error| ConfigurationError::InvalidDatabaseUrl(error.to_string())),
            Self::Parts {
                host,
                port,
                user,
                password,
                name,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(name)),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Selected storage backend.
    pub storage_mode: StorageMode,
    /// Connection settings (required when `storage_mode` is `Postgres`).
    pub database: Option<DatabaseConfig>,
}

impl RepositoryConfig {
    /// Configuration for process-local storage.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            storage_mode: StorageMode::InMemory,
            database: None,
        }
    }

    /// Configuration for `PostgreSQL` storage.
    #[must_use]
    pub const fn postgres(database: DatabaseConfig) -> Self {
        Self {
            storage_mode: StorageMode::Postgres,
            database: Some(database),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`RepositoryConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(&env_lookup)
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Database settings are only read in `Postgres` mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `STORAGE_MODE` is invalid or the
    /// database settings are incomplete.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let storage_mode = match lookup_trimmed(lookup, "STORAGE_MODE") {
            Some(value) => value.parse()?,
            None => StorageMode::default(),
        };

        match storage_mode {
            StorageMode::InMemory => Ok(Self::in_memory()),
            StorageMode::Postgres => Ok(Self::postgres(DatabaseConfig::from_lookup(lookup)?)),
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Creates the configured [`BankRepository`].
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new factory with the given configuration.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates the repository, connecting to the database when needed.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the settings are incomplete or the
    /// database cannot be reached.
    pub async fn create(&self) -> Result<Arc<dyn BankRepository + Send + Sync>, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Arc::new(InMemoryBankRepository::new())),
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;
                Ok(Arc::new(PostgresBankRepository::new(pool)))
            }
        }
    }

    async fn create_postgres_pool(&self) -> Result<sqlx::PgPool, FactoryError> {
        let database = self
            .config
            .database
            .as_ref()
            .ok_or(ConfigurationError::MissingVariable("DATABASE_URL"))?;
        let options = database.connect_options()?;

        PgPoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
