//! Shared handler state and the health endpoint.

use std::sync::Arc;

use axum::Json;

use crate::infrastructure::BankRepository;

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The repository is injected here instead of living in a global, so tests
/// can hand the router an in-memory store.
#[derive(Clone)]
pub struct AppState {
    /// Bank repository used by every query handler.
    pub bank_repository: Arc<dyn BankRepository + Send + Sync>,
}

impl AppState {
    /// Creates the state around an initialized repository.
    #[must_use]
    pub fn new(bank_repository: Arc<dyn BankRepository + Send + Sync>) -> Self {
        Self { bank_repository }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("bank_repository", &"Arc<dyn BankRepository>")
            .finish()
    }
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// Does not touch the database.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
