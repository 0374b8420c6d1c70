//! Prediction types shared by the heuristic and model paths

use serde::{Deserialize, Serialize};
use std::fmt;

/// Final verdict for one email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Phishing,
    Safe,
}

impl Label {
    pub fn from_flag(is_phishing: bool) -> Self {
        if is_phishing {
            Label::Phishing
        } else {
            Label::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Phishing => "PHISHING",
            Label::Safe => "SAFE",
        }
    }

    pub fn is_phishing(&self) -> bool {
        matches!(self, Label::Phishing)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which scorer produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Model,
    Heuristic,
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreSource::Model => f.write_str("model"),
            ScoreSource::Heuristic => f.write_str("heuristic"),
        }
    }
}

/// Prediction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    /// Phishing percentage 0-100; absent for hard-label classifiers
    pub score: Option<u8>,
    pub source: ScoreSource,
}
