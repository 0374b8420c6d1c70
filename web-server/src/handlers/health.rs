//! Health check handler

use axum::{extract::State, Json};
use phishguard_core::logic::history::BufferStatus;
use phishguard_core::logic::model::EngineStatus;
use phishguard_core::logic::service::ServiceStats;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    /// "model" or "heuristic"
    mode: &'static str,
    engine: Option<EngineStatus>,
    stats: ServiceStats,
    history: BufferStatus,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = &state.service;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        mode: if service.has_model() { "model" } else { "heuristic" },
        engine: service.engine_status(),
        stats: service.stats(),
        history: service.history().status(),
    })
}
