//! PhishGuard Web Server
//!
//! Single-process prediction endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     PHISHGUARD WEB                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  POST /predict ──┐                                       │
//! │  GET  /        ──┼──► PredictionService ──► HistoryBuffer│
//! │  GET  /api/... ──┘      │                                │
//! │                         ├─► ModelPredictor (optional)    │
//! │                         └─► HeuristicScorer              │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use phishguard_core::logic::model::{ModelPredictor, Predictor};
use phishguard_core::PredictionService;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "phishguard_web=debug,phishguard_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("PhishGuard web server starting ({})...", config.environment);
    tracing::info!("Model: {}, vectorizer: {}", config.model_path, config.vectorizer_path);

    // Model artifacts are loaded once; absence means heuristic mode for the process lifetime
    let predictor = ModelPredictor::try_load(
        &config.model_path,
        &config.vectorizer_path,
        &config.phishing_labels,
    )
    .map(|p| Box::new(p) as Box<dyn Predictor>);
    if predictor.is_none() {
        tracing::warn!("No model loaded - all predictions use the rule-based heuristic");
    }

    let state = AppState {
        service: Arc::new(PredictionService::new(predictor, config.history_capacity)),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub config: Arc<config::Config>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if !state.config.is_production() {
        cors = cors.allow_origin(Any);
    }

    Router::new()
        .route("/", get(handlers::history::index))
        .route("/predict", post(handlers::predict::predict))
        .route("/api/history", get(handlers::history::list))
        .route("/health", get(handlers::health::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
