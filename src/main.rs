use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod config;
mod db;
mod estimator;
mod model;

use api::AppState;
use config::Config;
use db::Database;
use model::{BaseModel, EvenModel, RatingModel};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // Open prediction log
    let db = Database::open(&config.database_path)?;
    info!("Database opened: {}", config.database_path);

    // Load the static model
    let model: Arc<dyn BaseModel> = match &config.model_path {
        Some(path) => Arc::new(RatingModel::load(path)?),
        None => {
            warn!("No MODEL_PATH configured, base predictions will be 50/50");
            Arc::new(EvenModel::new())
        }
    };
    info!(
        "Static model '{}' ready (accuracy {:.2}%, score model: {})",
        model.name(),
        model.metadata().accuracy * 100.0,
        if model.has_score_model() { "loaded" } else { "not available" }
    );

    if config.cricket_overs_notation {
        info!("Reading current_overs in scorecard notation");
    }

    let state = AppState {
        db,
        model,
        total_overs: f64::from(config.total_overs),
        cricket_overs_notation: config.cricket_overs_notation,
    };
    let app = api::router(state);
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Prediction API listening on http://{} ({} overs format)", addr, config.total_overs);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
