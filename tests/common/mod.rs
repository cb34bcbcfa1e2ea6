//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every helper.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::FutureExt;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bank_directory::api::{AppState, build_router};
use bank_directory::domain::{Bank, Branch, NewBankRecord};
use bank_directory::infrastructure::{
    BankRepository, InMemoryBankRepository, RepositoryError, RepositoryFuture,
};

// =============================================================================
// Repository Helpers
// =============================================================================

/// Repository whose every call fails with a database error.
#[derive(Debug, Clone)]
pub struct FailingBankRepository {
    message: String,
}

impl FailingBankRepository {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T: Send + 'static>(&self) -> RepositoryFuture<T> {
        let message = self.message.clone();
        async move { Err(RepositoryError::DatabaseError(message)) }.boxed()
    }
}

impl BankRepository for FailingBankRepository {
    fn ensure_schema(&self) -> RepositoryFuture<()> {
        self.fail()
    }

    fn insert_all(&self, _records: Vec<NewBankRecord>) -> RepositoryFuture<u64> {
        self.fail()
    }

    fn list_banks(&self) -> RepositoryFuture<Vec<Bank>> {
        self.fail()
    }

    fn find_branches(&self, _bank_code: &str) -> RepositoryFuture<Vec<Branch>> {
        self.fail()
    }

    fn find_branch(&self, _bank_code: &str, _branch_code: &str) -> RepositoryFuture<Option<Branch>> {
        self.fail()
    }
}

/// Sample rows: two banks, the second with two branches.
pub fn sample_records() -> Vec<NewBankRecord> {
    vec![
        NewBankRecord::new("004", "Bank A")
            .with_address("1 Main St")
            .with_phone("02-1111-1111"),
        NewBankRecord::new("005", "Bank B").with_address("5 Harbor Rd"),
        NewBankRecord::new("005", "Bank B Annex").with_phone("02-2222-2222"),
    ]
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Builds the router over `repository`.
pub fn router_with(repository: impl BankRepository + 'static) -> Router {
    build_router(AppState::new(Arc::new(repository)))
}

/// Builds the router over an in-memory repository holding `records`.
pub fn router_with_records(records: Vec<NewBankRecord>) -> Router {
    router_with(InMemoryBankRepository::with_records(records))
}

/// Sends `GET uri` and returns the status and the parsed JSON body.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).expect("Failed to build request"))
        .await
        .expect("Router is infallible");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Body is not JSON");
    (status, body)
}
