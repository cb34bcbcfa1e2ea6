//! Domain module for bank directory records.
//!
//! This module contains the persisted bank row model and the read-only
//! projections served by the query API.

pub mod bank;

pub use bank::{
    ADDRESS_MAX_LENGTH, BANK_CODE_MAX_LENGTH, BANK_NAME_MAX_LENGTH, Bank, BankId, BankRecord,
    Branch, NewBankRecord, PHONE_MAX_LENGTH,
};
