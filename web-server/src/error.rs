//! Error handling
//!
//! Every failure leaves as `{"ok": false, "error": "..."}`.

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use phishguard_core::PredictError;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No text provided.")]
    NoText,

    #[error("Invalid JSON body.")]
    InvalidJson,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoText | AppError::InvalidJson => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!("Rejecting request: {}", self);

        let body = Json(json!({
            "ok": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::EmptyText => AppError::NoText,
        }
    }
}
