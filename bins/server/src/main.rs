//! Teller API Server
//!
//! Main entry point for the Teller ledger service.

mod seed;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teller_api::{AppState, create_router};
use teller_ledger::{AccountStore, LedgerService, TransactionLog};
use teller_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teller=debug,teller_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Build the in-process stores and the ledger service on top of them
    let accounts = Arc::new(AccountStore::new());
    let transactions = Arc::new(TransactionLog::new());
    let ledger = Arc::new(LedgerService::new(Arc::clone(&accounts), transactions));
    info!("Ledger initialized");

    // Load demo accounts into an empty store
    if config.seed.demo {
        seed::load_demo_accounts(&accounts)?;
    } else {
        info!("Demo seed disabled");
    }

    // Create application state
    let state = AppState { ledger };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
