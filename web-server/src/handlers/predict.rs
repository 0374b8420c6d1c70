//! Prediction handler

use axum::{body::Bytes, extract::State, Json};
use phishguard_core::{Label, PredictionResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub ok: bool,
    pub label: Label,
    pub score: Option<u8>,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            ok: true,
            label: result.label,
            score: result.score,
        }
    }
}

/// `POST /predict`
///
/// The body is parsed as JSON whatever the declared content type.
pub async fn predict(State(state): State<AppState>, body: Bytes) -> AppResult<Json<PredictResponse>> {
    let req: PredictRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Unparsable predict body: {}", e);
        AppError::InvalidJson
    })?;
    req.validate().map_err(|_| AppError::NoText)?;

    let text = req.text.ok_or(AppError::NoText)?;
    let result = state.service.predict(&text)?;

    tracing::info!(
        label = %result.label,
        score = ?result.score,
        source = %result.source,
        "Prediction served"
    );
    Ok(Json(result.into()))
}
