//! One-shot CSV import into the `banks` table.

use std::path::Path;
use std::sync::Arc;

use super::{ImportError, MalformedRowPolicy, read_bank_records};
use crate::infrastructure::BankRepository;

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Rows written to storage.
    pub inserted: u64,
    /// Malformed rows skipped under [`MalformedRowPolicy::Skip`].
    pub skipped: usize,
}

/// Loads CSV files into a [`BankRepository`].
///
/// The table is created first if absent. The file is then parsed in full
/// and all rows are inserted in a single atomic batch, so a failing row
/// leaves storage as it was before the import.
#[derive(Clone)]
pub struct CsvImporter {
    repository: Arc<dyn BankRepository + Send + Sync>,
    policy: MalformedRowPolicy,
}

impl CsvImporter {
    /// Creates an importer writing to `repository`.
    #[must_use]
    pub fn new(
        repository: Arc<dyn BankRepository + Send + Sync>,
        policy: MalformedRowPolicy,
    ) -> Self {
        Self { repository, policy }
    }

    /// Imports the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` if the table cannot be created, the file cannot
    /// be read or parsed, or the insert fails. On error no rows are written.
    pub async fn import_file(&self, path: &Path) -> Result<ImportReport, ImportError> {
        self.repository.ensure_schema().await?;

        tracing::info!(path = %path.display(), policy = ?self.policy, "Reading CSV file");
        let parsed = read_bank_records(path, self.policy)?;
        tracing::debug!(rows = parsed.records.len(), skipped = parsed.skipped, "CSV parsed");

        let inserted = self.repository.insert_all(parsed.records).await?;

        let report = ImportReport {
            inserted,
            skipped: parsed.skipped,
        };
        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "CSV data imported"
        );
        Ok(report)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BANK_CODE_MAX_LENGTH;
    use crate::infrastructure::{InMemoryBankRepository, RepositoryError};
    use rstest::rstest;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn importer(repository: &InMemoryBankRepository, policy: MalformedRowPolicy) -> CsvImporter {
        CsvImporter::new(Arc::new(repository.clone()), policy)
    }

    #[rstest]
    #[tokio::test]
    async fn test_import_inserts_every_data_row() {
        let repository = InMemoryBankRepository::new();
        let file = csv_file(
            "id,code,name,address,phone\n\
             1,004,Bank A,1 Main St,02-1111-1111\n\
             2,005,Bank B,,\n\
             3,005,Bank B Annex,9 Side St,\n",
        );

        let report = importer(&repository, MalformedRowPolicy::Fail)
            .import_file(file.path())
            .await
            .unwrap();

        assert_eq!(report, ImportReport { inserted: 3, skipped: 0 });
        let rows = repository.rows().await;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].bank_code, "004");
        assert_eq!(rows[0].phone.as_deref(), Some("02-1111-1111"));
        assert_eq!(rows[2].address.as_deref(), Some("9 Side St"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_import_header_only_inserts_nothing() {
        let repository = InMemoryBankRepository::new();
        let file = csv_file("id,code,name,address,phone\n");

        let report = importer(&repository, MalformedRowPolicy::Fail)
            .import_file(file.path())
            .await
            .unwrap();

        assert_eq!(report.inserted, 0);
        assert!(repository.rows().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_import_empty_file_fails() {
        let repository = InMemoryBankRepository::new();
        let file = csv_file("");

        let result = importer(&repository, MalformedRowPolicy::Fail)
            .import_file(file.path())
            .await;

        assert!(matches!(result, Err(ImportError::MissingHeader)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_import_failed_insert_writes_nothing() {
        let repository = InMemoryBankRepository::new();
        let long_code = "9".repeat(BANK_CODE_MAX_LENGTH + 1);
        let file = csv_file(&format!(
            "id,code,name,address,phone\n1,004,Bank A,,\n2,{long_code},Bank Z,,\n"
        ));

        let result = importer(&repository, MalformedRowPolicy::Fail)
            .import_file(file.path())
            .await;

        assert!(matches!(
            result,
            Err(ImportError::Repository(RepositoryError::ConstraintViolation(_)))
        ));
        assert!(repository.rows().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_import_malformed_row_fails_before_writing() {
        let repository = InMemoryBankRepository::new();
        let file = csv_file("id,code,name,address,phone\n1,004,Bank A,,\n2,005\n");

        let result = importer(&repository, MalformedRowPolicy::Fail)
            .import_file(file.path())
            .await;

        assert!(matches!(result, Err(ImportError::MalformedRow { row: 3, .. })));
        assert!(repository.rows().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_import_malformed_row_skipped() {
        let repository = InMemoryBankRepository::new();
        let file = csv_file("id,code,name,address,phone\n1,004,Bank A,,\n2,005\n");

        let report = importer(&repository, MalformedRowPolicy::Skip)
            .import_file(file.path())
            .await
            .unwrap();

        assert_eq!(report, ImportReport { inserted: 1, skipped: 1 });
    }

    #[rstest]
    #[tokio::test]
    async fn test_import_appends_to_existing_rows() {
        let repository = InMemoryBankRepository::new();
        let file = csv_file("id,code,name,address,phone\n1,004,Bank A,,\n");
        let importer = importer(&repository, MalformedRowPolicy::Fail);

        importer.import_file(file.path()).await.unwrap();
        importer.import_file(file.path()).await.unwrap();

        assert_eq!(repository.rows().await.len(), 2);
    }
}
