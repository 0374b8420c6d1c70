//! Dataset Builder
//!
//! Merges the safe-email export and the phishing-email export into one
//! shuffled, labelled JSONL file for training.

use std::fs::File;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::constants::DATASET_SHUFFLE_SEED;
use super::record::{DatasetRecord, PHISHING_LABEL, SAFE_LABEL};
use super::writer::DatasetWriter;
use super::DatasetError;

/// Value of the type column that marks a phishing row
pub const PHISHING_TYPE: &str = "Phishing Email";

#[derive(Debug, Clone)]
pub struct CombineConfig {
    pub safe_csv: PathBuf,
    pub phishing_csv: PathBuf,
    pub output: PathBuf,
    pub seed: u64,
}

impl Default for CombineConfig {
    fn default() -> Self {
        use crate::constants::{DEFAULT_DATASET_PATH, DEFAULT_PHISHING_CSV, DEFAULT_SAFE_CSV};
        Self {
            safe_csv: PathBuf::from(DEFAULT_SAFE_CSV),
            phishing_csv: PathBuf::from(DEFAULT_PHISHING_CSV),
            output: PathBuf::from(DEFAULT_DATASET_PATH),
            seed: DATASET_SHUFFLE_SEED,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineSummary {
    pub safe_count: usize,
    pub phishing_count: usize,
    pub dropped_empty: usize,
    pub total: usize,
}

// ============================================================================
// CSV LOADING
// ============================================================================

fn open_csv(path: &Path) -> Result<(csv::Reader<File>, csv::StringRecord), DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| DatasetError::csv(path, e))?
        .clone();
    Ok((reader, headers))
}

fn column(path: &Path, headers: &csv::StringRecord, name: &str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| DatasetError::MissingColumn {
            file: path.to_path_buf(),
            column: name.to_string(),
        })
}

/// Safe emails: `Subject` + " " + `Message`, label 0
pub fn load_safe_emails(path: impl AsRef<Path>) -> Result<Vec<DatasetRecord>, DatasetError> {
    let path = path.as_ref();
    let (mut reader, headers) = open_csv(path)?;
    let subject = column(path, &headers, "Subject")?;
    let message = column(path, &headers, "Message")?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DatasetError::csv(path, e))?;
        let text = format!(
            "{} {}",
            row.get(subject).unwrap_or(""),
            row.get(message).unwrap_or("")
        );
        records.push(DatasetRecord { text, label: SAFE_LABEL });
    }

    log::info!("Loaded {} safe emails from {}", records.len(), path.display());
    Ok(records)
}

/// Phishing emails: rows typed `Phishing Email`, text from `Email Text`, label 1
pub fn load_phishing_emails(path: impl AsRef<Path>) -> Result<Vec<DatasetRecord>, DatasetError> {
    let path = path.as_ref();
    let (mut reader, headers) = open_csv(path)?;
    let text_col = column(path, &headers, "Email Text")?;
    let type_col = column(path, &headers, "Email Type")?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DatasetError::csv(path, e))?;
        if row.get(type_col).map(str::trim) != Some(PHISHING_TYPE) {
            continue;
        }
        records.push(DatasetRecord {
            text: row.get(text_col).unwrap_or("").to_string(),
            label: PHISHING_LABEL,
        });
    }

    log::info!("Loaded {} phishing emails from {}", records.len(), path.display());
    Ok(records)
}

// ============================================================================
// COMBINE
// ============================================================================

/// Concatenate, shuffle deterministically, drop blank texts
pub fn merge(
    safe: Vec<DatasetRecord>,
    phishing: Vec<DatasetRecord>,
    seed: u64,
) -> (Vec<DatasetRecord>, usize) {
    let mut combined: Vec<DatasetRecord> = safe.into_iter().chain(phishing).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    combined.shuffle(&mut rng);

    let before = combined.len();
    combined.retain(|r| !r.text.trim().is_empty());
    let dropped = before - combined.len();

    (combined, dropped)
}

/// Build the training dataset file
pub fn combine(config: &CombineConfig) -> Result<CombineSummary, DatasetError> {
    log::info!("Starting dataset combination process...");

    let safe = load_safe_emails(&config.safe_csv)?;
    let phishing = load_phishing_emails(&config.phishing_csv)?;

    let (records, dropped_empty) = merge(safe, phishing, config.seed);

    let mut writer = DatasetWriter::create(&config.output)?;
    for record in &records {
        writer.append(record)?;
    }
    let total = writer.finish()?;

    let summary = CombineSummary {
        safe_count: records.iter().filter(|r| r.label == SAFE_LABEL).count(),
        phishing_count: records.iter().filter(|r| r.label == PHISHING_LABEL).count(),
        dropped_empty,
        total,
    };

    log::info!(
        "Saved {} records to {} ({} safe, {} phishing, {} empty dropped)",
        summary.total,
        config.output.display(),
        summary.safe_count,
        summary.phishing_count,
        summary.dropped_empty
    );
    Ok(summary)
}
