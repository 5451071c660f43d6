//! Civica API Server
//!
//! Main entry point for the attachment and voting HTTP service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civica_api::{AppState, create_router};
use civica_core::attachment::AttachmentService;
use civica_core::inference::HttpInferenceClient;
use civica_core::storage::{StorageConfig, StorageService};
use civica_core::voting::HttpVotingClient;
use civica_db::{AttachmentRepository, connect};
use civica_shared::{AppConfig, StorageSettings};

fn build_storage(settings: Option<&StorageSettings>) -> anyhow::Result<Option<Arc<StorageService>>> {
    let Some(settings) = settings else {
        warn!("No storage configured, only attachments with a public URL can be viewed");
        return Ok(None);
    };

    let config = StorageConfig::from_settings(settings).context("invalid storage settings")?;
    let storage = StorageService::from_config(config).context("failed to build storage")?;
    info!(provider = storage.provider_name(), "Storage configured");

    Ok(Some(Arc::new(storage)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civica=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Connect to database
    let db = connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    // Collaborators
    let storage = build_storage(config.storage.as_ref())?;
    let attachments = AttachmentService::new(storage, Arc::new(AttachmentRepository::new(db)));

    let inference = HttpInferenceClient::new(&config.inference)?;
    info!(base_url = %config.inference.base_url, "Inference gateway configured");

    let voting = HttpVotingClient::new(&config.web3)?;
    info!(base_url = %config.web3.base_url, "Web3 gateway configured");

    // Create application state
    let state = AppState {
        attachments: Arc::new(attachments),
        inference: Arc::new(inference),
        voting: Arc::new(voting),
    };

    // Create router
    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
