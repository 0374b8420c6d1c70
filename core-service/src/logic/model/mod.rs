//! Model Module - Scoring Engines
//!
//! Heuristic fallback plus the trained linear text classifier.
//! Both produce a [`PredictionResult`]; the service picks which one runs.

pub mod types;
pub mod error;
pub mod threshold;
pub mod fallback;
pub mod vectorizer;
pub mod classifier;
pub mod artifact;
pub mod inference;

// Re-export common types
pub use types::{Label, PredictionResult, ScoreSource};
pub use error::{ArtifactError, InferenceError};
pub use threshold::ThresholdConfig;
pub use fallback::{heuristic_predict, HeuristicScore, HeuristicScorer, HeuristicWeights};
pub use vectorizer::{SparseVector, TfidfVectorizer, VectorizerConfig};
pub use classifier::{ClassifierArtifact, ClassifierOutput, LinearModel};
pub use artifact::{ClassMap, ModelArtifact, ModelMetadata};
pub use inference::{EngineStatus, ModelPrediction, ModelPredictor, Predictor};
