//! Dataset Module - Training Data Preparation
//!
//! Builds the labelled training set from raw CSV exports and stores it as
//! JSONL, one `{"text", "label"}` record per line.

pub mod record;
pub mod writer;
pub mod combine;


use std::path::{Path, PathBuf};
use thiserror::Error;

pub use combine::{combine, merge, CombineConfig, CombineSummary};
pub use record::DatasetRecord;
pub use writer::{read_jsonl, DatasetWriter};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("file error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column {column:?} not found in {}", file.display())]
    MissingColumn { file: PathBuf, column: String },

    #[error("bad JSON record in {} at line {line}: {source}", path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl DatasetError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        DatasetError::Csv {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
