//! eventdesk server entry point.
//!
//! Loads configuration, prepares the database (migrations and the default
//! organizer), and starts the Axum HTTP server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use eventdesk::config::{AppConfig, LogFormat};
use eventdesk::persistence::{PostgresStore, Store};
use eventdesk::service::EventService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting eventdesk");

    // Store: the pool connects on first use
    let postgres = PostgresStore::connect_lazy(&config).context("invalid DATABASE_URL")?;
    if config.run_migrations {
        postgres
            .migrate()
            .await
            .context("failed to apply migrations")?;
        tracing::info!("migrations applied");
    }
    let store: Arc<dyn Store> = Arc::new(postgres);

    // Seed the organizer before accepting requests
    EventService::new(Arc::clone(&store))
        .ensure_default_user(&config.default_user)
        .await
        .context("failed to seed default user")?;

    // Build router
    let app = eventdesk::build_app(eventdesk::build_state(store, config.default_user.id));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
