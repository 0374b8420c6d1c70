use serde::{Deserialize, Serialize};

/// Label values written by the dataset builder
pub const SAFE_LABEL: u8 = 0;
pub const PHISHING_LABEL: u8 = 1;

/// One labelled email in the combined dataset
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub text: String,
    /// 0 = safe, 1 = phishing
    pub label: u8,
}

impl DatasetRecord {
    pub fn safe(text: impl Into<String>) -> Self {
        Self { text: text.into(), label: SAFE_LABEL }
    }

    pub fn phishing(text: impl Into<String>) -> Self {
        Self { text: text.into(), label: PHISHING_LABEL }
    }
}
