//! Bank domain model.
//!
//! A single denormalized `banks` table stores one row per bank branch.
//! Rows are only ever created by the CSV importer; the query side reads
//! them through the [`Bank`] and [`Branch`] projections.

// =============================================================================
// Column Limits
// =============================================================================

/// Maximum length (in characters) of the `bank_code` column.
pub const BANK_CODE_MAX_LENGTH: usize = 50;

/// Maximum length (in characters) of the `bank_name` column.
pub const BANK_NAME_MAX_LENGTH: usize = 100;

/// Maximum length (in characters) of the `address` column.
pub const ADDRESS_MAX_LENGTH: usize = 255;

/// Maximum length (in characters) of the `phone` column.
pub const PHONE_MAX_LENGTH: usize = 50;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Storage-assigned identifier of a bank row.
///
/// Identifiers are assigned by the database on insert and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BankId(i64);

impl BankId {
    /// Wraps a raw database identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BankId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// NewBankRecord
// =============================================================================

/// A bank row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBankRecord {
    /// Code grouping branch rows under one bank.
    pub bank_code: String,
    /// Display name of the bank.
    pub bank_name: String,
    /// Postal address, if known.
    pub address: Option<String>,
    /// Phone number, if known.
    pub phone: Option<String>,
}

impl NewBankRecord {
    /// Creates a record with no address or phone.
    #[must_use]
    pub fn new(bank_code: impl Into<String>, bank_name: impl Into<String>) -> Self {
        Self {
            bank_code: bank_code.into(),
            bank_name: bank_name.into(),
            address: None,
            phone: None,
        }
    }

    /// Sets the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns a description of the first column that exceeds its storage
    /// limit, or `None` if the record fits the `banks` table.
    #[must_use]
    pub fn column_violation(&self) -> Option<String> {
        let columns = [
            ("bank_code", Some(self.bank_code.as_str()), BANK_CODE_MAX_LENGTH),
            ("bank_name", Some(self.bank_name.as_str()), BANK_NAME_MAX_LENGTH),
            ("address", self.address.as_deref(), ADDRESS_MAX_LENGTH),
            ("phone", self.phone.as_deref(), PHONE_MAX_LENGTH),
        ];

        columns.into_iter().find_map(|(column, value, limit)| {
            let length = value.map_or(0, |value| value.chars().count());
            (length > limit).then(|| {
                format!("value too long for column {column}: {length} characters (limit {limit})")
            })
        })
    }
}

// =============================================================================
// BankRecord
// =============================================================================

/// A persisted row of the `banks` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRecord {
    /// Storage-assigned identifier.
    pub id: BankId,
    /// Code grouping branch rows under one bank. Not unique.
    pub bank_code: String,
    /// Display name of the bank.
    pub bank_name: String,
    /// Postal address, if known.
    pub address: Option<String>,
    /// Phone number, if known.
    pub phone: Option<String>,
}

impl BankRecord {
    /// Builds the persisted form of `record` with the assigned `id`.
    #[must_use]
    pub fn from_new(id: BankId, record: NewBankRecord) -> Self {
        Self {
            id,
            bank_code: record.bank_code,
            bank_name: record.bank_name,
            address: record.address,
            phone: record.phone,
        }
    }

    /// The branch code of this row. The schema has no separate column, so
    /// the bank code doubles as the branch code.
    #[must_use]
    pub fn branch_code(&self) -> &str {
        &self.bank_code
    }

    /// Returns true if this row is the branch `branch_code` of bank `bank_code`.
    ///
    /// Both comparisons are exact and case-sensitive.
    #[must_use]
    pub fn matches_branch(&self, bank_code: &str, branch_code: &str) -> bool {
        self.bank_code == bank_code && self.branch_code() == branch_code
    }

    /// Projects this row into its bank listing entry.
    #[must_use]
    pub fn to_bank(&self) -> Bank {
        Bank {
            bank_code: self.bank_code.clone(),
            branch_code: self.branch_code().to_string(),
            bank_name: self.bank_name.clone(),
        }
    }

    /// Projects this row into its branch detail.
    #[must_use]
    pub fn to_branch(&self) -> Branch {
        Branch {
            branch_code: self.branch_code().to_string(),
            bank_name: self.bank_name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

// =============================================================================
// Projections
// =============================================================================

/// Bank listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    pub bank_code: String,
    pub branch_code: String,
    pub bank_name: String,
}

/// Branch detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub branch_code: String,
    pub bank_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
