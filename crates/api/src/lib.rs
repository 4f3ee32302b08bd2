//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for accounts, deposits, withdrawals and history
//! - Request validation and error-to-status mapping
//! - Response types

pub mod routes;

use axum::Router;
use std::sync::Arc;
use teller_ledger::LedgerService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger service holding account and transaction state.
    pub ledger: Arc<LedgerService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
