//! Training Module - Offline Model Fitting
//!
//! Fits a [`TfidfVectorizer`] and a logistic-regression [`ClassifierArtifact`]
//! on labelled text, then writes the artifact pair the predictor loads.

pub mod logistic;
pub mod synthetic;


use std::collections::BTreeSet;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::dataset::{DatasetError, DatasetRecord};
use crate::logic::model::{
    ArtifactError, ClassifierArtifact, LinearModel, ModelArtifact, SparseVector, TfidfVectorizer,
    VectorizerConfig,
};
use crate::logic::text::clean_text;

pub use logistic::LogisticConfig;
pub use synthetic::synthetic_samples;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("no training samples")]
    EmptyDataset,

    #[error("training data has a single class {0:?}, need at least two")]
    SingleClass(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// One labelled document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub text: String,
    pub label: String,
}

impl TrainingSample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

impl From<DatasetRecord> for TrainingSample {
    fn from(record: DatasetRecord) -> Self {
        Self {
            text: record.text,
            label: record.label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainConfig {
    pub vectorizer: VectorizerConfig,
    /// Run [`clean_text`] on every document before fitting
    pub clean: bool,
    pub logistic: LogisticConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub samples: usize,
    pub classes: Vec<String>,
    pub vocabulary_size: usize,
    /// Gradient steps taken, summed over decision rows
    pub iterations: usize,
    pub training_accuracy: f64,
}

#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub vectorizer: TfidfVectorizer,
    pub classifier: ClassifierArtifact,
    pub report: TrainReport,
}

impl TrainedModel {
    pub fn save(&self, model_path: impl AsRef<Path>, vectorizer_path: impl AsRef<Path>) -> Result<(), TrainError> {
        ModelArtifact::save(&self.vectorizer, &self.classifier, model_path, vectorizer_path)?;
        Ok(())
    }
}

/// Fit vectorizer and classifier on `samples`
pub fn train(samples: &[TrainingSample], config: &TrainConfig) -> Result<TrainedModel, TrainError> {
    if samples.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let classes: Vec<String> = samples
        .iter()
        .map(|s| s.label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if classes.len() < 2 {
        return Err(TrainError::SingleClass(classes.into_iter().next().unwrap_or_default()));
    }

    let docs: Vec<String> = samples
        .iter()
        .map(|s| if config.clean { clean_text(&s.text) } else { s.text.clone() })
        .collect();

    log::info!(
        "Training on {} samples, {} classes, clean={}",
        samples.len(),
        classes.len(),
        config.clean
    );

    let vectorizer = TfidfVectorizer::fit(&docs, &config.vectorizer)?;
    let dim = vectorizer.dimension();
    let rows: Vec<SparseVector> = docs.iter().map(|d| vectorizer.transform(d)).collect();
    log::debug!("Vocabulary size {}", dim);

    // Binary: one row scoring classes[1]. Otherwise one-vs-rest per class.
    let positives: Vec<&String> = if classes.len() == 2 {
        vec![&classes[1]]
    } else {
        classes.iter().collect()
    };

    let mut coef = Array2::<f64>::zeros((positives.len(), dim));
    let mut intercept = Array1::<f64>::zeros(positives.len());
    let mut iterations = 0;

    for (row, positive) in positives.iter().enumerate() {
        let targets: Vec<f64> = samples
            .iter()
            .map(|s| if &&s.label == positive { 1.0 } else { 0.0 })
            .collect();
        let fit = logistic::fit_binary(&rows, &targets, dim, &config.logistic);
        log::debug!(
            "Class {:?}: {} iterations, loss {:.6}",
            positive,
            fit.iterations,
            fit.final_loss
        );
        coef.row_mut(row).assign(&fit.weights);
        intercept[row] = fit.bias;
        iterations += fit.iterations;
    }

    let classifier = ClassifierArtifact::LogisticRegression(LinearModel {
        classes: classes.clone(),
        coef,
        intercept,
    });
    classifier.validate()?;

    let correct = samples
        .iter()
        .zip(&rows)
        .filter(|(s, x)| predicted_class(classifier.linear(), x) == Some(s.label.as_str()))
        .count();
    let training_accuracy = correct as f64 / samples.len() as f64;

    let report = TrainReport {
        samples: samples.len(),
        classes,
        vocabulary_size: dim,
        iterations,
        training_accuracy,
    };
    log::info!(
        "Training finished: vocabulary {}, accuracy {:.3}",
        report.vocabulary_size,
        report.training_accuracy
    );

    Ok(TrainedModel {
        vectorizer,
        classifier,
        report,
    })
}

/// Train from a JSONL dataset built by [`crate::logic::dataset::combine`]
pub fn train_from_jsonl(path: impl AsRef<Path>, config: &TrainConfig) -> Result<TrainedModel, TrainError> {
    let samples: Vec<TrainingSample> = crate::logic::dataset::read_jsonl(path)?
        .into_iter()
        .map(TrainingSample::from)
        .collect();
    train(&samples, config)
}

fn predicted_class<'a>(model: &'a LinearModel, x: &SparseVector) -> Option<&'a str> {
    let scores: Vec<f64> = model
        .coef
        .rows()
        .into_iter()
        .zip(model.intercept.iter())
        .map(|(w, b)| x.entries.iter().map(|&(i, v)| w[i] * v).sum::<f64>() + b)
        .collect();

    if model.is_binary() {
        let idx = if scores.first().copied().unwrap_or(0.0) > 0.0 { 1 } else { 0 };
        return model.classes.get(idx).map(String::as_str);
    }

    scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .and_then(|(i, _)| model.classes.get(i))
        .map(String::as_str)
}
