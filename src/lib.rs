//! Bank Directory Library
//!
//! Shared code for the `bank-import` CSV loader and the `bank-directory`
//! read-only HTTP lookup service.

pub mod api;
pub mod config;
pub mod domain;
pub mod import;
pub mod infrastructure;
pub mod telemetry;
