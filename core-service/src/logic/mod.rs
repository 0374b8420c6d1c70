//! Logic Module - Business Logic & Engines
//!
//! ## Layout
//! - `features/` - Signal extraction from raw email text
//! - `model/` - Heuristic scorer, TF-IDF vectorizer, linear classifiers, inference
//! - `history` - Bounded buffer of recent predictions
//! - `service` - Request orchestration (validate, score, record)
//! - `text/` - Offline text cleaning (stopwords, lemmatizer)
//! - `dataset/` - Labelled dataset builder
//! - `training/` - Vectorizer + logistic regression fitting

pub mod features;
pub mod model;
pub mod history;
pub mod service;
pub mod text;
pub mod dataset;
pub mod training;
