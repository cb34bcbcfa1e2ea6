//! Data Transfer Objects for API responses.
//!
//! The wire contract of the query endpoints. Domain projections carry no
//! serde derives; only these types are serialized.

use serde::{Deserialize, Serialize};

use crate::domain::{Bank, Branch};

/// Entry of `GET /api/banks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankResponse {
    pub bank_code: String,
    pub branch_code: String,
    pub bank_name: String,
}

impl From<Bank> for BankResponse {
    fn from(bank: Bank) -> Self {
        Self {
            bank_code: bank.bank_code,
            branch_code: bank.branch_code,
            bank_name: bank.bank_name,
        }
    }
}

/// Branch detail returned by the branch endpoints.
///
/// Missing `phone` or `address` values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchResponse {
    pub branch_code: String,
    pub bank_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            branch_code: branch.branch_code,
            bank_name: branch.bank_name,
            phone: branch.phone,
            address: branch.address,
        }
    }
}
