//! CSV import pipeline.
//!
//! Reads a header-prefixed CSV file and loads its data rows into the
//! `banks` table through a [`BankRepository`](crate::infrastructure::BankRepository).

pub mod config;
pub mod error;
pub mod importer;
pub mod reader;

pub use config::{DEFAULT_IMPORT_FILE, ImportConfig, MalformedRowPolicy};
pub use error::ImportError;
pub use importer::{CsvImporter, ImportReport};
pub use reader::{ParsedRows, read_bank_records, read_bank_records_from};
