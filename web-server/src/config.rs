//! Configuration module

use std::env;

use phishguard_core::constants;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Classifier artifact
    pub model_path: String,

    /// Vectorizer artifact
    pub vectorizer_path: String,

    /// Number of recent predictions kept for the index page
    pub history_capacity: usize,

    /// Class labels treated as "phishing" when mapping model outputs
    pub phishing_labels: Vec<String>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_path: constants::get_model_path(),
            vectorizer_path: constants::get_vectorizer_path(),
            history_capacity: constants::get_history_capacity(),
            phishing_labels: constants::get_phishing_labels(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            model_path: constants::DEFAULT_MODEL_PATH.to_string(),
            vectorizer_path: constants::DEFAULT_VECTORIZER_PATH.to_string(),
            history_capacity: constants::DEFAULT_HISTORY_CAPACITY,
            phishing_labels: constants::default_phishing_labels(),
            environment: "development".to_string(),
        }
    }
}
