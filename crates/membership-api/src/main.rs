//! Membership portal API - Entry point.

use membership_api::api::{create_router, AppState};
use membership_api::Config;
use migration::{Migrator, MigratorTrait};
use notify_client::{EmailClient, SmsClient};
use payments_client::PaymentsClient;
use sea_orm::Database;
use secrecy::SecretString;
use sheets_client::SheetsClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting membership portal API");

    // Connect and migrate the relational store
    let db = match Database::connect(&config.database.url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    // External collaborators. Absent credentials degrade quietly: the
    // ledger reports not-found and both notifiers go log-only.
    let ledger = match SheetsClient::new(
        &config.sheets.api_url,
        config.sheets.api_key.clone().map(SecretString::new),
        &config.sheets.sheet_id,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create sheets client: {}", e);
            std::process::exit(1);
        }
    };

    let email = match EmailClient::new(
        &config.email.api_url,
        config.email.api_key.clone().map(SecretString::new),
        &config.email.sender_email,
        config.email.sender_name.clone(),
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create email client: {}", e);
            std::process::exit(1);
        }
    };

    let sms = match SmsClient::new(
        &config.sms.api_url,
        config.sms.api_key.clone().map(SecretString::new),
        &config.sms.sender_id,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create SMS client: {}", e);
            std::process::exit(1);
        }
    };

    let payments = match PaymentsClient::new(
        &config.payments.api_url,
        &config.payments.key_id,
        SecretString::new(config.payments.key_secret.clone()),
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create payments client: {}", e);
            std::process::exit(1);
        }
    };

    if config.admin.token.is_none() {
        warn!("Admin token not configured, back-office surface disabled");
    }

    let listen_addr = config.server.listen_addr.clone();
    let port = config.server.port;

    // Create application state and router
    let state = AppState::new(db, config, Arc::new(ledger), email, sms, payments);
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(listen_addr.parse().unwrap_or([0, 0, 0, 0].into()), port);

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
