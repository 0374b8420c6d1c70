//! Inference Engine - trained model path
//!
//! Runs the vectorizer/classifier pair on raw text and reports an explicit
//! `Result`. The caller decides what to do on failure; this module never
//! falls back on its own.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::constants::HARD_PHISHING_LABELS;
use super::artifact::{ModelArtifact, ModelMetadata};
use super::classifier::ClassifierOutput;
use super::error::{ArtifactError, InferenceError};
use super::threshold::ThresholdConfig;
use super::types::{Label, PredictionResult, ScoreSource};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Successful model output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub label: Label,
    /// Absent when the classifier only gives a hard label
    pub score: Option<u8>,
}

impl From<ModelPrediction> for PredictionResult {
    fn from(p: ModelPrediction) -> Self {
        PredictionResult {
            label: p.label,
            score: p.score,
            source: ScoreSource::Model,
        }
    }
}

/// Engine status for the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub metadata: Option<ModelMetadata>,
    pub phishing_label: Option<String>,
    pub inference_count: u64,
    pub inference_failures: u64,
}

// ============================================================================
// PREDICTOR TRAIT
// ============================================================================

/// Seam between the service and whatever model is plugged in
pub trait Predictor: Send + Sync {
    fn predict(&self, text: &str) -> Result<ModelPrediction, InferenceError>;
    fn status(&self) -> EngineStatus;
}

// ============================================================================
// LINEAR MODEL PREDICTOR
// ============================================================================

pub struct ModelPredictor {
    artifact: ModelArtifact,
    thresholds: ThresholdConfig,
    inference_count: AtomicU64,
    inference_failures: AtomicU64,
}

impl ModelPredictor {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self {
            artifact,
            thresholds: ThresholdConfig::default(),
            inference_count: AtomicU64::new(0),
            inference_failures: AtomicU64::new(0),
        }
    }

    /// Load artifacts at startup. Missing files and load errors both yield
    /// `None` so the caller runs in heuristic mode for the whole process.
    pub fn try_load(
        model_path: impl AsRef<Path>,
        vectorizer_path: impl AsRef<Path>,
        phishing_labels: &[String],
    ) -> Option<Self> {
        match ModelArtifact::load(model_path, vectorizer_path, phishing_labels) {
            Ok(artifact) => {
                log::info!(
                    "Loaded {} model ({} features, classes {:?})",
                    artifact.metadata.classifier_kind,
                    artifact.metadata.vocabulary_size,
                    artifact.metadata.classes
                );
                Some(Self::new(artifact))
            }
            Err(ArtifactError::NotFound(path)) => {
                log::info!(
                    "Model artifact {} not found - running in rule-based fallback mode",
                    path.display()
                );
                None
            }
            Err(e) => {
                log::error!("Failed to load model/vectorizer: {} - using fallback heuristics", e);
                None
            }
        }
    }

    fn run(&self, text: &str) -> Result<ModelPrediction, InferenceError> {
        let x = self.artifact.vectorizer.transform_dense(text);

        match self.artifact.classifier.evaluate(&x)? {
            ClassifierOutput::Probabilities(proba) => {
                let index = self
                    .artifact
                    .class_map
                    .as_ref()
                    .map(|m| m.phishing_index)
                    .ok_or_else(|| InferenceError::Other("no class map for probability model".into()))?;
                let p = *proba.get(index).ok_or(InferenceError::ClassIndexOutOfRange {
                    index,
                    classes: proba.len(),
                })?;

                let percent = probability_to_percent(p);
                Ok(ModelPrediction {
                    label: self.thresholds.classify(ScoreSource::Model, percent),
                    score: Some(percent),
                })
            }
            ClassifierOutput::Label(predicted) => Ok(ModelPrediction {
                label: hard_label(&predicted),
                score: None,
            }),
        }
    }
}

impl Predictor for ModelPredictor {
    fn predict(&self, text: &str) -> Result<ModelPrediction, InferenceError> {
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        let result = self.run(text);
        if result.is_err() {
            self.inference_failures.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    fn status(&self) -> EngineStatus {
        EngineStatus {
            model_loaded: true,
            metadata: Some(self.artifact.metadata.clone()),
            phishing_label: self.artifact.class_map.as_ref().map(|m| m.phishing_label.clone()),
            inference_count: self.inference_count.load(Ordering::Relaxed),
            inference_failures: self.inference_failures.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Probability in [0, 1] to an integer percentage, rounding half up
pub fn probability_to_percent(p: f64) -> u8 {
    round_percent(p.clamp(0.0, 1.0) * 100.0)
}

/// Round a non-negative percentage half up (49.5 -> 50)
pub fn round_percent(percent: f64) -> u8 {
    percent.round().clamp(0.0, 100.0) as u8
}

/// Map a hard prediction to a label
pub fn hard_label(predicted: &str) -> Label {
    Label::from_flag(
        HARD_PHISHING_LABELS
            .iter()
            .any(|l| predicted.eq_ignore_ascii_case(l)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::classifier::{ClassifierArtifact, LinearModel};
    use crate::logic::model::vectorizer::{TfidfVectorizer, VectorizerConfig};
    use ndarray::{Array1, Array2};

    fn labels() -> Vec<String> {
        vec!["phish".to_string(), "PHISHING".to_string(), "1".to_string()]
    }

    /// Model that scores "verify" as phishing
    fn predictor(kind: &str) -> ModelPredictor {
        let vectorizer = TfidfVectorizer::fit(
            &["verify account", "team lunch"],
            &VectorizerConfig::default(),
        )
        .unwrap();
        let mut coef = Array2::zeros((1, vectorizer.dimension()));
        coef[[0, vectorizer.vocabulary["verify"]]] = -8.0;
        coef[[0, vectorizer.vocabulary["lunch"]]] = 8.0;

        // classes sorted: phish < safe, so a positive score means "safe"
        let model = LinearModel {
            classes: vec!["phish".into(), "safe".into()],
            coef,
            intercept: Array1::zeros(1),
        };
        let classifier = match kind {
            "svc" => ClassifierArtifact::LinearSvc(model),
            _ => ClassifierArtifact::LogisticRegression(model),
        };
        ModelPredictor::new(ModelArtifact::new(vectorizer, classifier, &labels()).unwrap())
    }

    #[test]
    fn test_probability_path() {
        let p = predictor("lr");
        let phish = p.predict("please verify").unwrap();
        assert_eq!(phish.label, Label::Phishing);
        assert!(phish.score.unwrap() >= 50);

        let safe = p.predict("lunch today").unwrap();
        assert_eq!(safe.label, Label::Safe);
        assert!(safe.score.unwrap() < 50);
    }

    #[test]
    fn test_unknown_words_are_even_odds() {
        // zero vector, zero intercept -> p = 0.5 -> 50 -> PHISHING
        let result = predictor("lr").predict("nothing known here").unwrap();
        assert_eq!(result.score, Some(50));
        assert_eq!(result.label, Label::Phishing);
    }

    #[test]
    fn test_hard_label_path_has_no_score() {
        let p = predictor("svc");
        let result = p.predict("verify now").unwrap();
        assert_eq!(result.label, Label::Phishing);
        assert_eq!(result.score, None);

        let result: PredictionResult = p.predict("lunch").unwrap().into();
        assert_eq!(result.label, Label::Safe);
        assert_eq!(result.source, ScoreSource::Model);
    }

    #[test]
    fn test_status_counts() {
        let p = predictor("lr");
        p.predict("verify").unwrap();
        p.predict("lunch").unwrap();
        let status = p.status();
        assert!(status.model_loaded);
        assert_eq!(status.inference_count, 2);
        assert_eq!(status.inference_failures, 0);
        assert_eq!(status.phishing_label.as_deref(), Some("phish"));
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_percent(49.5), 50);
        assert_eq!(round_percent(48.5), 49);
        assert_eq!(round_percent(49.49), 49);
        assert_eq!(probability_to_percent(1.0), 100);
        assert_eq!(probability_to_percent(0.0), 0);
        assert_eq!(probability_to_percent(0.123), 12);
    }

    #[test]
    fn test_hard_label_mapping() {
        assert_eq!(hard_label("phish"), Label::Phishing);
        assert_eq!(hard_label("Phishing"), Label::Phishing);
        assert_eq!(hard_label("1"), Label::Phishing);
        assert_eq!(hard_label("0"), Label::Safe);
        assert_eq!(hard_label("safe"), Label::Safe);
    }

    #[test]
    fn test_try_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ModelPredictor::try_load(
            dir.path().join("phishing_model.json"),
            dir.path().join("tfidf_vectorizer.json"),
            &labels(),
        );
        assert!(loaded.is_none());
    }
}
