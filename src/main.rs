//! Silica Predictor - Main Entry Point
//!
//! Loads the model artifact once and serves the prediction page over HTTP.

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use silica_predictor::{
    api::{configure_routes, AppState},
    config::{AppConfig, LoggingConfig},
    metrics::{MetricsReporter, PredictionMetrics},
    models::ModelLoader,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &LoggingConfig) -> Result<()> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!("silica_predictor={},actix_web=info", config.level))
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("Starting Silica Predictor");
    info!(
        model_path = %config.model.path.display(),
        host = %config.server.host,
        port = config.server.port,
        "Configuration loaded"
    );

    let metrics = Arc::new(PredictionMetrics::new());

    // Load the model once; a failure only disables prediction
    let loader = ModelLoader::init_global(config.model.onnx_threads);
    let state = AppState::load(loader, &config.model.path, metrics.clone());
    match state.model_name() {
        Some(name) => info!(model = %name, "Model ready"),
        None => warn!(
            path = %config.model.path.display(),
            "Model could not be loaded; prediction is disabled"
        ),
    }

    if config.metrics.report_interval_secs > 0 {
        let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
        actix_web::rt::spawn(reporter.start());
    }

    let bind = config.bind_address();
    info!("Listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .workers(config.server.workers.max(1))
    .bind(bind.clone())
    .with_context(|| format!("Failed to bind {}:{}", bind.0, bind.1))?
    .run()
    .await?;

    info!("Server shutting down...");
    metrics.print_summary();

    Ok(())
}
