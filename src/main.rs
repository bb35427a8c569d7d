//! Policy Gap Analyzer server entry point.
//!
//! Startup order: configuration, logging, catalog, text generator, listener.
//! The catalog is loaded and validated before the listener binds.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use policy_gap_analyzer::adapters::generation::build_text_generator;
use policy_gap_analyzer::adapters::http::{build_router, ComplianceAppState};
use policy_gap_analyzer::config::AppConfig;
use policy_gap_analyzer::domain::catalog::{CatalogError, FrameworkCatalog};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    if let Err(err) = config.validate() {
        error!(error = %err, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let catalog = match load_catalog(&config) {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => {
            error!(error = %err, "Failed to load framework catalog");
            return ExitCode::FAILURE;
        }
    };
    info!(frameworks = catalog.framework_count(), "Framework catalog loaded");

    let generator = match build_text_generator(&config) {
        Ok(generator) => generator,
        Err(err) => {
            error!(error = %err, "Failed to initialise text generation");
            return ExitCode::FAILURE;
        }
    };
    info!(
        enabled = config.features.enable_text_generation,
        "Text generation configured"
    );

    let addr = match config.server.socket_addr() {
        Ok(addr) => addr,
        Err(err) => {
            error!(error = %err, "Invalid server address");
            return ExitCode::FAILURE;
        }
    };

    let state = ComplianceAppState::new(catalog, generator, &config);
    let app = build_router(state, &config.server);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, %addr, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    info!(%addr, environment = ?config.server.environment, "Policy Gap Analyzer listening");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server terminated");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn load_catalog(config: &AppConfig) -> Result<FrameworkCatalog, CatalogError> {
    match config.catalog.path() {
        Some(path) => {
            info!(path = %path.display(), "Loading framework catalog from file");
            FrameworkCatalog::from_path(path)
        }
        None => FrameworkCatalog::builtin(),
    }
}
