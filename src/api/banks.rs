//! Read-only bank and branch lookup handlers.
//!
//! Each handler performs at most one repository call. Path parameters are
//! compared verbatim: no trimming, no case folding, no format checks.

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{BankResponse, BranchResponse};
use super::error::ApiErrorResponse;
use super::handlers::AppState;

// =============================================================================
// GET /api/banks Handler
// =============================================================================

/// Lists every bank row.
///
/// # Response
///
/// - **200 OK**: JSON array of banks (empty when the table is empty)
/// - **500 Internal Server Error**: Query failed
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] (500) if the repository query fails.
pub async fn list_banks(
    State(state): State<AppState>,
) -> Result<Json<Vec<BankResponse>>, ApiErrorResponse> {
    let banks = state.bank_repository.list_banks().await?;
    Ok(Json(banks.into_iter().map(BankResponse::from).collect()))
}

// =============================================================================
// GET /api/banks/{bank_code}/branches Handler
// =============================================================================

/// Lists the branches of one bank.
///
/// # Response
///
/// - **200 OK**: Non-empty JSON array of branches
/// - **404 Not Found**: No row has this bank code
/// - **500 Internal Server Error**: Query failed
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 404 when nothing matches, or 500 if
/// the repository query fails.
pub async fn list_branches(
    State(state): State<AppState>,
    Path(bank_code): Path<String>,
) -> Result<Json<Vec<BranchResponse>>, ApiErrorResponse> {
    let branches = state.bank_repository.find_branches(&bank_code).await?;

    if branches.is_empty() {
        return Err(ApiErrorResponse::not_found(format!(
            "No branches found for bank code '{bank_code}'"
        )));
    }

    Ok(Json(branches.into_iter().map(BranchResponse::from).collect()))
}

// =============================================================================
// GET /api/banks/{bank_code}/branches/{branch_code} Handler
// =============================================================================

/// Fetches a single branch.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 404 when no row matches both codes,
/// or 500 if the repository query fails.
pub async fn get_branch(
    State(state): State<AppState>,
    Path((bank_code, branch_code)): Path<(String, String)>,
) -> Result<Json<BranchResponse>, ApiErrorResponse> {
    state
        .bank_repository
        .find_branch(&bank_code, &branch_code)
        .await?
        .map(|branch| Json(BranchResponse::from(branch)))
        .ok_or_else(|| {
            ApiErrorResponse::not_found(format!(
                "Branch '{branch_code}' not found for bank code '{bank_code}'"
            ))
        })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBankRecord;
    use crate::infrastructure::InMemoryBankRepository;
    use axum::http::StatusCode;
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    #[fixture]
    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryBankRepository::with_records(vec![
            NewBankRecord::new("004", "Bank A").with_phone("02-1111-1111"),
            NewBankRecord::new("005", "Bank B").with_address("5 Harbor Rd"),
        ])))
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_banks(state: AppState) {
        let Json(banks) = list_banks(State(state)).await.unwrap();

        assert_eq!(banks.len(), 2);
        assert_eq!(banks[1].bank_code, "005");
        assert_eq!(banks[1].branch_code, "005");
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_branches_found(state: AppState) {
        let Json(branches) = list_branches(State(state), Path("005".to_string()))
            .await
            .unwrap();

        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].address.as_deref(), Some("5 Harbor Rd"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_branches_not_found(state: AppState) {
        let error = list_branches(State(state), Path("999".to_string()))
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert!(error.error.message.contains("999"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_branch_found(state: AppState) {
        let Json(branch) = get_branch(
            State(state),
            Path(("004".to_string(), "004".to_string())),
        )
        .await
        .unwrap();

        assert_eq!(branch.bank_name, "Bank A");
        assert_eq!(branch.phone.as_deref(), Some("02-1111-1111"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_branch_mismatched_pair_not_found(state: AppState) {
        let error = get_branch(
            State(state),
            Path(("004".to_string(), "005".to_string())),
        )
        .await
        .unwrap_err();

        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }
}
