//! Prediction Service
//!
//! Per request: validate -> score -> record -> respond.
//! Scoring prefers the trained model when one was loaded at startup and
//! drops to the heuristic scorer for any request the model cannot handle.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::history::{HistoryBuffer, HistoryEntry};
use crate::logic::model::{EngineStatus, HeuristicScorer, PredictionResult, Predictor};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("No text provided.")]
    EmptyText,
}

/// Service counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    pub total_predictions: u64,
    pub model_predictions: u64,
    pub heuristic_predictions: u64,
    pub model_fallbacks: u64,
}

pub struct PredictionService {
    predictor: Option<Box<dyn Predictor>>,
    heuristic: HeuristicScorer,
    history: HistoryBuffer,
    model_predictions: AtomicU64,
    heuristic_predictions: AtomicU64,
    model_fallbacks: AtomicU64,
}

impl PredictionService {
    pub fn new(predictor: Option<Box<dyn Predictor>>, history_capacity: usize) -> Self {
        Self {
            predictor,
            heuristic: HeuristicScorer::default(),
            history: HistoryBuffer::new(history_capacity),
            model_predictions: AtomicU64::new(0),
            heuristic_predictions: AtomicU64::new(0),
            model_fallbacks: AtomicU64::new(0),
        }
    }

    /// Service with no model: every request is scored heuristically
    pub fn heuristic_only(history_capacity: usize) -> Self {
        Self::new(None, history_capacity)
    }

    pub fn has_model(&self) -> bool {
        self.predictor.is_some()
    }

    /// Validate, score and record one email
    pub fn predict(&self, text: &str) -> Result<PredictionResult, PredictError> {
        if text.is_empty() {
            return Err(PredictError::EmptyText);
        }

        let result = self.score(text);
        self.history.push(HistoryEntry::new(&result, text));
        Ok(result)
    }

    /// Score without validation or recording
    pub fn score(&self, text: &str) -> PredictionResult {
        if let Some(predictor) = &self.predictor {
            match predictor.predict(text) {
                Ok(prediction) => {
                    self.model_predictions.fetch_add(1, Ordering::Relaxed);
                    return prediction.into();
                }
                Err(e) => {
                    log::warn!("Model prediction error: {} - using heuristic for this request", e);
                    self.model_fallbacks.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        self.heuristic_predictions.fetch_add(1, Ordering::Relaxed);
        self.heuristic.predict(text)
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn engine_status(&self) -> Option<EngineStatus> {
        self.predictor.as_ref().map(|p| p.status())
    }

    pub fn stats(&self) -> ServiceStats {
        let model = self.model_predictions.load(Ordering::Relaxed);
        let heuristic = self.heuristic_predictions.load(Ordering::Relaxed);
        ServiceStats {
            total_predictions: model + heuristic,
            model_predictions: model,
            heuristic_predictions: heuristic,
            model_fallbacks: self.model_fallbacks.load(Ordering::Relaxed),
        }
    }
}
