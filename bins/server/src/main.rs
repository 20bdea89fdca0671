//! Tally API Server
//!
//! Main entry point for the Tally ledger service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router, quotes::HttpQuoteProvider};
use tally_core::currency::QuoteProvider;
use tally_db::connect;
use tally_db::migration::{Migrator, MigratorTrait};
use tally_shared::{AppConfig, AppError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tally_api=debug,tally_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;

    // Connect to database
    let db = connect(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Connected to database");

    if config.database.run_migrations {
        Migrator::up(&db, None)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Migrations applied");
    }

    // Exchange quotes are optional
    let quotes: Option<Arc<dyn QuoteProvider>> = if config.quotes.enabled {
        let provider = HttpQuoteProvider::new(config.quotes.clone())
            .map_err(|e| AppError::ExternalService(e.to_string()))?;
        info!(
            url = %config.quotes.url,
            currency = %config.quotes.currency,
            "Exchange quotes enabled"
        );
        Some(Arc::new(provider))
    } else {
        warn!("Exchange quotes disabled; balances will not be projected");
        None
    };

    // Create application state and router
    let app = create_router(AppState::new(db, quotes));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
