//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for clients, accounts and movements
//! - Mapping of ledger errors to JSON error responses
//! - The HTTP exchange quote provider

pub mod error;
pub mod quotes;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tally_core::currency::QuoteProvider;
use tally_core::ledger::LedgerService;
use tally_db::SeaOrmStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger operations over the database.
    pub ledger: LedgerService<SeaOrmStore>,
    /// Exchange quote source for balance projections (optional).
    pub quotes: Option<Arc<dyn QuoteProvider>>,
}

impl AppState {
    /// Builds the state over a database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, quotes: Option<Arc<dyn QuoteProvider>>) -> Self {
        Self {
            ledger: LedgerService::new(Arc::new(SeaOrmStore::new(db))),
            quotes,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
