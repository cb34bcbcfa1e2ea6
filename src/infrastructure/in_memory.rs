//! In-memory repository implementation.
//!
//! Backs tests and local development (`STORAGE_MODE=in_memory`). Rows are
//! kept in insertion order behind a `tokio::sync::RwLock`; readers never
//! block each other.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::domain::{Bank, BankId, BankRecord, Branch, NewBankRecord};
use crate::infrastructure::repository::check_column_limits;
use crate::infrastructure::{BankRepository, RepositoryFuture};

#[derive(Debug, Default)]
struct BankTable {
    rows: Vec<BankRecord>,
    last_id: i64,
}

/// In-memory implementation of `BankRepository`.
///
/// Cloning shares the underlying table.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryBankRepository::new();
/// repository.insert_all(vec![NewBankRecord::new("004", "Bank A")]).await?;
/// let banks = repository.list_banks().await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBankRepository {
    table: Arc<RwLock<BankTable>>,
}

impl InMemoryBankRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `records`.
    #[must_use]
    pub fn with_records(records: Vec<NewBankRecord>) -> Self {
        let mut table = BankTable::default();
        for record in records {
            table.last_id += 1;
            table
                .rows
                .push(BankRecord::from_new(BankId::new(table.last_id), record));
        }
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// Returns a snapshot of all stored rows.
    pub async fn rows(&self) -> Vec<BankRecord> {
        self.table.read().await.rows.clone()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl BankRepository for InMemoryBankRepository {
    fn ensure_schema(&self) -> RepositoryFuture<()> {
        async { Ok(()) }.boxed()
    }

    fn insert_all(&self, records: Vec<NewBankRecord>) -> RepositoryFuture<u64> {
        let table = Arc::clone(&self.table);
        async move {
            check_column_limits(&records)?;

            let mut guard = table.write().await;
            let inserted = records.len() as u64;
            for record in records {
                guard.last_id += 1;
                let id = BankId::new(guard.last_id);
                guard.rows.push(BankRecord::from_new(id, record));
            }
            Ok(inserted)
        }
        .boxed()
    }

    fn list_banks(&self) -> RepositoryFuture<Vec<Bank>> {
        let table = Arc::clone(&self.table);
        async move {
            let guard = table.read().await;
            Ok(guard.rows.iter().map(BankRecord::to_bank).collect())
        }
        .boxed()
    }

    fn find_branches(&self, bank_code: &str) -> RepositoryFuture<Vec<Branch>> {
        let table = Arc::clone(&self.table);
        let bank_code = bank_code.to_string();
        async move {
            let guard = table.read().await;
            Ok(guard
                .rows
                .iter()
                .filter(|row| row.bank_code == bank_code)
                .map(BankRecord::to_branch)
                .collect())
        }
        .boxed()
    }

    fn find_branch(&self, bank_code: &str, branch_code: &str) -> RepositoryFuture<Option<Branch>> {
        let table = Arc::clone(&self.table);
        let bank_code = bank_code.to_string();
        let branch_code = branch_code.to_string();
        async move {
            let guard = table.read().await;
            Ok(guard
                .rows
                .iter()
                .find(|row| row.matches_branch(&bank_code, &branch_code))
                .map(BankRecord::to_branch))
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
