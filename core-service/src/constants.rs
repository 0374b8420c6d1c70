//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! The web server and the CLI both read their fallbacks from here.

/// Default location of the fitted classifier
pub const DEFAULT_MODEL_PATH: &str = "phishing_model.json";

/// Default location of the fitted TF-IDF vectorizer
pub const DEFAULT_VECTORIZER_PATH: &str = "tfidf_vectorizer.json";

/// Number of recent predictions kept in memory
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Upper bound on a configured history size
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Class labels recognised as "phishing", tried in order
pub const DEFAULT_PHISHING_LABELS: &[&str] = &["phish", "PHISHING", "1"];

/// Hard predictions matching one of these (case-insensitive) are phishing
pub const HARD_PHISHING_LABELS: &[&str] = &["phish", "phishing", "1"];

/// Default dataset builder inputs and output
pub const DEFAULT_SAFE_CSV: &str = "safe_emails.csv";
pub const DEFAULT_PHISHING_CSV: &str = "Phishing_Email.csv";
pub const DEFAULT_DATASET_PATH: &str = "final_model_dataset.jsonl";

/// Seed used to shuffle the combined dataset
pub const DATASET_SHUFFLE_SEED: u64 = 42;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PhishGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classifier path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get vectorizer path from environment or use default
pub fn get_vectorizer_path() -> String {
    std::env::var("VECTORIZER_PATH")
        .unwrap_or_else(|_| DEFAULT_VECTORIZER_PATH.to_string())
}

/// Get history capacity from environment or use default, capped at
/// [`MAX_HISTORY_CAPACITY`]
pub fn get_history_capacity() -> usize {
    parse_history_capacity(std::env::var("HISTORY_CAPACITY").ok().as_deref())
}

fn parse_history_capacity(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|&n: &usize| n > 0)
        .map(|n| n.min(MAX_HISTORY_CAPACITY))
        .unwrap_or(DEFAULT_HISTORY_CAPACITY)
}

/// Owned copy of [`DEFAULT_PHISHING_LABELS`]
pub fn default_phishing_labels() -> Vec<String> {
    DEFAULT_PHISHING_LABELS.iter().map(|s| s.to_string()).collect()
}

/// Get phishing class labels (comma separated) from environment or use default
pub fn get_phishing_labels() -> Vec<String> {
    std::env::var("PHISHING_LABELS")
        .ok()
        .map(|s| parse_label_list(&s))
        .filter(|labels| !labels.is_empty())
        .unwrap_or_else(default_phishing_labels)
}

fn parse_label_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
