//! Model errors
//!
//! `ArtifactError` covers load/save time, `InferenceError` covers a single
//! prediction. Neither ever reaches an HTTP client: the service falls back
//! to the heuristic scorer instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("feature dimension mismatch: input has {input}, classifier expects {expected}")]
    DimensionMismatch { input: usize, expected: usize },

    #[error("classifier produced a non-finite output")]
    NonFinite,

    #[error("phishing class index {index} out of range for {classes} outputs")]
    ClassIndexOutOfRange { index: usize, classes: usize },

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),

    #[error("vocabulary is empty: no document produced a token")]
    EmptyVocabulary,

    #[error("no recognised phishing label among classes {classes:?} (looked for {labels:?})")]
    UnknownPhishingLabel {
        classes: Vec<String>,
        labels: Vec<String>,
    },
}
