//! PhishGuard Core - phishing email classification
//!
//! ```text
//! raw email ─► features ─► heuristic scorer ─┐
//!          └─► vectorizer ─► classifier ─────┴─► PredictionService ─► history
//! ```
//!
//! The web server and the `phishguard` CLI are thin shells around
//! [`logic::service::PredictionService`].

pub mod constants;
pub mod logic;

pub use logic::features::{extract_features, EmailFeatures};
pub use logic::history::{HistoryBuffer, HistoryEntry};
pub use logic::model::{
    heuristic_predict, InferenceError, Label, ModelArtifact, ModelPredictor, PredictionResult,
    ScoreSource,
};
pub use logic::service::{PredictError, PredictionService};
