//! Route table and middleware for the query service.

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::banks::{get_branch, list_banks, list_branches};
use super::config::ServiceConfig;
use super::handlers::{AppState, health_check};

/// Builds the route table without middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/banks", get(list_banks))
        .route("/api/banks/{bank_code}/branches", get(list_branches))
        .route(
            "/api/banks/{bank_code}/branches/{branch_code}",
            get(get_branch),
        )
        .with_state(state)
}

/// CORS policy admitting exactly one origin.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// Builds the full application: routes, request tracing and CORS.
pub fn build_application(state: AppState, config: &ServiceConfig) -> Router {
    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.allowed_origin.clone()))
}
