//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod banks;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use banks::{get_branch, list_banks, list_branches};
pub use config::ServiceConfig;
pub use dto::{BankResponse, BranchResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use handlers::{AppState, HealthResponse, health_check};
pub use router::{build_application, build_router, cors_layer};
