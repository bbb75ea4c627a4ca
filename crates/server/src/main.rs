//! Prediction Server - equipment failure prediction over HTTP
//!
//! Serves the prediction action backed by a hosted generative model,
//! together with health probes and Prometheus metrics.

use anyhow::{Context, Result};
use predictor_lib::{
    health::{components, HealthRegistry},
    observability::{PredictorMetrics, StructuredLogger},
    ModelClient, PredictionAction, PredictionService,
};
use prediction_server::{api, config};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs, filtered by RUST_LOG
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting prediction-server");

    let config = config::ServerConfig::load()?;
    info!(model = %config.model_name, endpoint = %config.model_endpoint, "Server configured");

    let model = ModelClient::new(config.model_client_config())
        .context("Failed to create model client")?;
    let api_key_configured = model.has_api_key();

    let health_registry = HealthRegistry::new();
    health_registry.register(components::PREDICTION_SERVICE).await;
    health_registry.register(components::MODEL_CLIENT).await;
    if !api_key_configured {
        warn!("ANTHROPIC_API_KEY not set, predictions will return degraded results");
        health_registry
            .set_degraded(components::MODEL_CLIENT, "ANTHROPIC_API_KEY not set")
            .await;
    }

    let metrics = PredictorMetrics::new();
    metrics.set_model(&config.model_name);

    let logger = StructuredLogger::new(&config.service_name);
    logger.log_startup(SERVER_VERSION, &config.model_name, api_key_configured);

    let service = PredictionService::new(Arc::new(model));
    let action = PredictionAction::new(service, health_registry.clone(), metrics.clone(), logger.clone());
    let app_state = Arc::new(api::AppState::new(action, health_registry.clone(), metrics));

    health_registry.mark_serving().await;

    let shutdown_logger = logger.clone();
    let shutdown_registry = health_registry.clone();
    api::serve(config.api_port, app_state, async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_logger.log_shutdown("SIGINT received");
            shutdown_registry.begin_drain("SIGINT received").await;
        }
    })
    .await?;

    info!("Shutting down");
    Ok(())
}
