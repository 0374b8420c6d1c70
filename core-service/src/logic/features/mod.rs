//! Features Module - Email Signal Extraction
//!
//! Keyword tables and regexes live in `patterns`; the extractor itself is a
//! pure function over the raw text.

pub mod patterns;
pub mod extractor;


// Re-export common types
pub use extractor::{extract_features, replyto_mismatch, EmailFeatures, EmailSample};
