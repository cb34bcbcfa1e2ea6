//! `PostgreSQL` repository implementation.
//!
//! Uses `sqlx` with a shared `PgPool`; the pool hands out connections to
//! concurrent requests, so the repository itself holds no locks.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS banks (
//!     id BIGSERIAL PRIMARY KEY,
//!     bank_code VARCHAR(50) NOT NULL,
//!     bank_name VARCHAR(100) NOT NULL,
//!     address VARCHAR(255),
//!     phone VARCHAR(50)
//! );
//! ```

use futures::FutureExt;
use sqlx::PgPool;

use crate::domain::{Bank, Branch, NewBankRecord};
use crate::infrastructure::repository::check_column_limits;
use crate::infrastructure::{BankRepository, RepositoryFuture};

const CREATE_BANKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS banks (\
     id BIGSERIAL PRIMARY KEY, \
     bank_code VARCHAR(50) NOT NULL, \
     bank_name VARCHAR(100) NOT NULL, \
     address VARCHAR(255), \
     phone VARCHAR(50))";

const INSERT_BANK: &str =
    "INSERT INTO banks (bank_code, bank_name, address, phone) VALUES ($1, $2, $3, $4)";

const SELECT_BANKS: &str =
    "SELECT bank_code, bank_code AS branch_code, bank_name FROM banks ORDER BY id";

const SELECT_BRANCHES: &str = "SELECT bank_code AS branch_code, bank_name, phone, address \
     FROM banks WHERE bank_code = $1 ORDER BY id";

const SELECT_BRANCH: &str = "SELECT bank_code AS branch_code, bank_name, phone, address \
     FROM banks WHERE bank_code = $1 AND bank_code = $2 ORDER BY id LIMIT 1";

type BranchRow = (String, String, Option<String>, Option<String>);

fn branch_from_row((branch_code, bank_name, phone, address): BranchRow) -> Branch {
    Branch {
        branch_code,
        bank_name,
        phone,
        address,
    }
}

/// `PostgreSQL` implementation of `BankRepository`.
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/banks").await?;
/// let repository = PostgresBankRepository::new(pool);
/// repository.ensure_schema().await?;
/// let banks = repository.list_banks().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresBankRepository {
    pool: PgPool,
}

impl PostgresBankRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BankRepository for PostgresBankRepository {
    fn ensure_schema(&self) -> RepositoryFuture<()> {
        let pool = self.pool.clone();
        async move {
            sqlx::query(CREATE_BANKS_TABLE).execute(&pool).await?;
            Ok(())
        }
        .boxed()
    }

    fn insert_all(&self, records: Vec<NewBankRecord>) -> RepositoryFuture<u64> {
        let pool = self.pool.clone();
        async move {
            check_column_limits(&records)?;

            // Dropping the transaction on an early return rolls it back.
            let mut transaction = pool.begin().await?;
            let mut inserted = 0_u64;

            for record in &records {
                let result = sqlx::query(INSERT_BANK)
                    .bind(&record.bank_code)
                    .bind(&record.bank_name)
                    .bind(record.address.as_deref())
                    .bind(record.phone.as_deref())
                    .execute(&mut *transaction)
                    .await?;
                inserted += result.rows_affected();
            }

            transaction.commit().await?;
            Ok(inserted)
        }
        .boxed()
    }

    fn list_banks(&self) -> RepositoryFuture<Vec<Bank>> {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(String, String, String)> =
                sqlx::query_as(SELECT_BANKS).fetch_all(&pool).await?;

            Ok(rows
                .into_iter()
                .map(|(bank_code, branch_code, bank_name)| Bank {
                    bank_code,
                    branch_code,
                    bank_name,
                })
                .collect())
        }
        .boxed()
    }

    fn find_branches(&self, bank_code: &str) -> RepositoryFuture<Vec<Branch>> {
        let pool = self.pool.clone();
        let bank_code = bank_code.to_string();
        async move {
            let rows: Vec<BranchRow> = sqlx::query_as(SELECT_BRANCHES)
                .bind(&bank_code)
                .fetch_all(&pool)
                .await?;

            Ok(rows.into_iter().map(branch_from_row).collect())
        }
        .boxed()
    }

    fn find_branch(&self, bank_code: &str, branch_code: &str) -> RepositoryFuture<Option<Branch>> {
        let pool = self.pool.clone();
        let bank_code = bank_code.to_string();
        let branch_code = branch_code.to_string();
        async move {
            let row: Option<BranchRow> = sqlx::query_as(SELECT_BRANCH)
                .bind(&bank_code)
                .bind(&branch_code)
                .fetch_optional(&pool)
                .await?;

            Ok(row.map(branch_from_row))
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
