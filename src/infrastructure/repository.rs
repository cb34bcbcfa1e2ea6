//! Repository trait for the `banks` table.
//!
//! Every method returns a boxed `'static` future so implementations can be
//! held behind `Arc<dyn BankRepository>` and shared across request tasks.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Bank, Branch, NewBankRecord};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A row violated a storage constraint (column length, NOT NULL).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// SQLSTATE `string_data_right_truncation`: a value exceeds its `VARCHAR` limit.
const STRING_TOO_LONG: &str = "22001";

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(database_error) = &error
            && database_error.code().as_deref() == Some(STRING_TOO_LONG)
        {
            return Self::ConstraintViolation(database_error.message().to_string());
        }
        Self::DatabaseError(error.to_string())
    }
}

/// Checks every record against the column limits before anything is written.
///
/// # Errors
///
/// Returns `RepositoryError::ConstraintViolation` for the first offending record.
pub fn check_column_limits(records: &[NewBankRecord]) -> Result<(), RepositoryError> {
    match records.iter().find_map(NewBankRecord::column_violation) {
        Some(violation) => Err(RepositoryError::ConstraintViolation(violation)),
        None => Ok(()),
    }
}

/// Future returned by every [`BankRepository`] method.
pub type RepositoryFuture<T> = BoxFuture<'static, Result<T, RepositoryError>>;

// =============================================================================
// Bank Repository
// =============================================================================

/// Repository for bank rows.
///
/// The write side (`ensure_schema`, `insert_all`) is used by the importer;
/// the read side backs the query endpoints and never mutates storage.
pub trait BankRepository: Send + Sync {
    /// Creates the `banks` table if it does not exist.
    fn ensure_schema(&self) -> RepositoryFuture<()>;

    /// Inserts all records atomically.
    ///
    /// Either every record is stored or, on the first failure, none are.
    /// Returns the number of rows inserted.
    fn insert_all(&self, records: Vec<NewBankRecord>) -> RepositoryFuture<u64>;

    /// Lists every row as a bank entry, in insertion order.
    fn list_banks(&self) -> RepositoryFuture<Vec<Bank>>;

    /// Lists the branches whose bank code equals `bank_code` exactly,
    /// in insertion order. Returns an empty vector when nothing matches.
    fn find_branches(&self, bank_code: &str) -> RepositoryFuture<Vec<Branch>>;

    /// Finds the first branch matching both codes exactly.
    fn find_branch(&self, bank_code: &str, branch_code: &str) -> RepositoryFuture<Option<Branch>>;
}

// =============================================================================
// Tests
// =============================================================================
