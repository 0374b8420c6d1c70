//! Linear Classifiers
//!
//! Two persisted model kinds share the same linear form `W·x + b`:
//! - `logistic_regression` yields class probabilities
//! - `linear_svc` yields only a hard class label
//!
//! Binary models store a single coefficient row scoring `classes[1]`;
//! multi-class models store one row per class (one-vs-rest).

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, InferenceError};

/// Weights shared by both classifier kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// Class labels, sorted
    pub classes: Vec<String>,
    /// Shape `(1, n_features)` for binary, `(n_classes, n_features)` otherwise
    pub coef: Array2<f64>,
    pub intercept: Array1<f64>,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    pub fn is_binary(&self) -> bool {
        self.classes.len() == 2
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(ArtifactError::Invalid(format!(
                "classifier needs at least two classes, found {}",
                n_classes
            )));
        }

        let expected_rows = if self.is_binary() { 1 } else { n_classes };
        if self.coef.nrows() != expected_rows {
            return Err(ArtifactError::Invalid(format!(
                "{} classes need {} coefficient rows, found {}",
                n_classes,
                expected_rows,
                self.coef.nrows()
            )));
        }
        if self.intercept.len() != expected_rows {
            return Err(ArtifactError::Invalid(format!(
                "expected {} intercepts, found {}",
                expected_rows,
                self.intercept.len()
            )));
        }
        if self.coef.iter().chain(self.intercept.iter()).any(|w| !w.is_finite()) {
            return Err(ArtifactError::Invalid("weights contain non-finite values".to_string()));
        }

        Ok(())
    }

    /// Raw decision values, one per coefficient row
    pub fn decision_function(&self, x: &Array1<f64>) -> Result<Array1<f64>, InferenceError> {
        if x.len() != self.n_features() {
            return Err(InferenceError::DimensionMismatch {
                input: x.len(),
                expected: self.n_features(),
            });
        }

        let scores = self.coef.dot(x) + &self.intercept;
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(InferenceError::NonFinite);
        }
        Ok(scores)
    }
}

/// What a classifier can say about one input
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutput {
    /// One probability per class, aligned with `classes`
    Probabilities(Vec<f64>),
    /// Hard prediction only
    Label(String),
}

/// Persisted classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LinearModel),
    LinearSvc(LinearModel),
}

impl ClassifierArtifact {
    pub fn linear(&self) -> &LinearModel {
        match self {
            ClassifierArtifact::LogisticRegression(m) | ClassifierArtifact::LinearSvc(m) => m,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierArtifact::LogisticRegression(_) => "logistic_regression",
            ClassifierArtifact::LinearSvc(_) => "linear_svc",
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.linear().classes
    }

    pub fn has_probabilities(&self) -> bool {
        matches!(self, ClassifierArtifact::LogisticRegression(_))
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        self.linear().validate()
    }

    pub fn evaluate(&self, x: &Array1<f64>) -> Result<ClassifierOutput, InferenceError> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => predict_proba(m, x).map(ClassifierOutput::Probabilities),
            ClassifierArtifact::LinearSvc(m) => predict_label(m, x).map(ClassifierOutput::Label),
        }
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn predict_proba(model: &LinearModel, x: &Array1<f64>) -> Result<Vec<f64>, InferenceError> {
    let scores = model.decision_function(x)?;

    if model.is_binary() {
        let p = sigmoid(scores[0]);
        return Ok(vec![1.0 - p, p]);
    }

    // one-vs-rest, renormalised
    let raw: Vec<f64> = scores.iter().map(|&s| sigmoid(s)).collect();
    let total: f64 = raw.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(InferenceError::NonFinite);
    }
    Ok(raw.into_iter().map(|p| p / total).collect())
}

fn predict_label(model: &LinearModel, x: &Array1<f64>) -> Result<String, InferenceError> {
    let scores = model.decision_function(x)?;

    let index = if model.is_binary() {
        usize::from(scores[0] > 0.0)
    } else {
        scores
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &s)| if s > best.1 { (i, s) } else { best })
            .0
    };

    model
        .classes
        .get(index)
        .cloned()
        .ok_or(InferenceError::ClassIndexOutOfRange {
            index,
            classes: model.classes.len(),
        })
}
