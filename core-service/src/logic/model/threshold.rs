//! Decision Thresholds
//!
//! Percent cut-offs that turn a score into a label. The heuristic and the
//! trained model are calibrated differently, so each has its own.

use serde::{Deserialize, Serialize};

use super::types::{Label, ScoreSource};

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Heuristic scores at or above this are phishing
    pub heuristic_percent: u8,

    /// Model probabilities at or above this are phishing
    pub model_percent: u8,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            heuristic_percent: 40,
            model_percent: 50,
        }
    }
}

impl ThresholdConfig {
    pub fn threshold_for(&self, source: ScoreSource) -> u8 {
        match source {
            ScoreSource::Heuristic => self.heuristic_percent,
            ScoreSource::Model => self.model_percent,
        }
    }

    /// Label for a percentage score from the given source
    pub fn classify(&self, source: ScoreSource, percent: u8) -> Label {
        Label::from_flag(percent >= self.threshold_for(source))
    }
}
