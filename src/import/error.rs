//! Import error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::infrastructure::RepositoryError;

/// Errors that abort a CSV import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The CSV file could not be opened.
    #[error("Failed to open CSV file {}: {source}", .path.display())]
    Open {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// The input has no first line.
    #[error("Failed to read CSV header: input is empty")]
    MissingHeader,

    /// The first line could not be parsed.
    #[error("Failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    /// Reading the input failed at the I/O level.
    #[error("Failed to read CSV input: {0}")]
    Read(#[source] csv::Error),

    /// A data row could not be parsed or has too few fields.
    #[error("Malformed CSV row {row}: {reason}")]
    MalformedRow {
        /// 1-based record number; the header is row 1.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// Storing the rows failed; nothing was written.
    #[error("Failed to insert rows: {0}")]
    Repository(#[from] RepositoryError),
}
