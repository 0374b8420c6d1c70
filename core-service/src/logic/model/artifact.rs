//! Model Artifacts - load, validate, save
//!
//! A usable model is a vectorizer/classifier pair written by the trainer as
//! two JSON files. Loading validates both halves against each other and
//! resolves the phishing class once, so inference never has to guess.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::ClassifierArtifact;
use super::error::ArtifactError;
use super::vectorizer::TfidfVectorizer;

// ============================================================================
// CLASS MAP
// ============================================================================

/// Resolved position of the phishing class in the probability output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMap {
    pub phishing_index: usize,
    pub phishing_label: String,
}

impl ClassMap {
    /// First configured label present in `classes` wins
    pub fn build(classes: &[String], phishing_labels: &[String]) -> Result<Self, ArtifactError> {
        phishing_labels
            .iter()
            .find_map(|label| {
                classes.iter().position(|c| c == label).map(|index| ClassMap {
                    phishing_index: index,
                    phishing_label: label.clone(),
                })
            })
            .ok_or_else(|| ArtifactError::UnknownPhishingLabel {
                classes: classes.to_vec(),
                labels: phishing_labels.to_vec(),
            })
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub vectorizer_path: String,
    pub classifier_kind: String,
    pub classes: Vec<String>,
    pub vocabulary_size: usize,
    pub model_sha256: String,
    pub vectorizer_sha256: String,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// ARTIFACT
// ============================================================================

/// Loaded, validated vectorizer + classifier pair
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub vectorizer: TfidfVectorizer,
    pub classifier: ClassifierArtifact,
    /// Present only for classifiers that output probabilities
    pub class_map: Option<ClassMap>,
    pub metadata: ModelMetadata,
}

impl ModelArtifact {
    /// Assemble and validate an in-memory pair
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: ClassifierArtifact,
        phishing_labels: &[String],
    ) -> Result<Self, ArtifactError> {
        let metadata = ModelMetadata {
            model_path: "<memory>".to_string(),
            vectorizer_path: "<memory>".to_string(),
            classifier_kind: classifier.kind().to_string(),
            classes: classifier.classes().to_vec(),
            vocabulary_size: vectorizer.dimension(),
            model_sha256: String::new(),
            vectorizer_sha256: String::new(),
            loaded_at: Utc::now(),
        };
        Self::assemble(vectorizer, classifier, phishing_labels, metadata)
    }

    /// Load both files; missing files are reported as [`ArtifactError::NotFound`]
    pub fn load(
        model_path: impl AsRef<Path>,
        vectorizer_path: impl AsRef<Path>,
        phishing_labels: &[String],
    ) -> Result<Self, ArtifactError> {
        let model_path = model_path.as_ref();
        let vectorizer_path = vectorizer_path.as_ref();
        log::info!(
            "Loading model from {} and vectorizer from {}",
            model_path.display(),
            vectorizer_path.display()
        );

        let model_bytes = read_artifact(model_path)?;
        let vectorizer_bytes = read_artifact(vectorizer_path)?;

        let classifier: ClassifierArtifact = parse_artifact(model_path, &model_bytes)?;
        let vectorizer: TfidfVectorizer = parse_artifact(vectorizer_path, &vectorizer_bytes)?;

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            vectorizer_path: vectorizer_path.display().to_string(),
            classifier_kind: classifier.kind().to_string(),
            classes: classifier.classes().to_vec(),
            vocabulary_size: vectorizer.dimension(),
            model_sha256: sha256_hex(&model_bytes),
            vectorizer_sha256: sha256_hex(&vectorizer_bytes),
            loaded_at: Utc::now(),
        };

        Self::assemble(vectorizer, classifier, phishing_labels, metadata)
    }

    fn assemble(
        vectorizer: TfidfVectorizer,
        classifier: ClassifierArtifact,
        phishing_labels: &[String],
        metadata: ModelMetadata,
    ) -> Result<Self, ArtifactError> {
        vectorizer.validate()?;
        classifier.validate()?;

        let width = classifier.linear().n_features();
        if width != vectorizer.dimension() {
            return Err(ArtifactError::Invalid(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.dimension(),
                width
            )));
        }

        let class_map = if classifier.has_probabilities() {
            Some(ClassMap::build(classifier.classes(), phishing_labels)?)
        } else {
            None
        };

        Ok(Self {
            vectorizer,
            classifier,
            class_map,
            metadata,
        })
    }

    /// Write both halves as pretty JSON
    pub fn save(
        vectorizer: &TfidfVectorizer,
        classifier: &ClassifierArtifact,
        model_path: impl AsRef<Path>,
        vectorizer_path: impl AsRef<Path>,
    ) -> Result<(), ArtifactError> {
        write_artifact(model_path.as_ref(), classifier)?;
        write_artifact(vectorizer_path.as_ref(), vectorizer)?;
        Ok(())
    }
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_artifact<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let io_err = |source| ArtifactError::Io {
        path: PathBuf::from(path),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_vec_pretty(value).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)?;

    log::info!("Saved {}", path.display());
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::classifier::LinearModel;
    use crate::logic::model::vectorizer::VectorizerConfig;
    use ndarray::{Array1, Array2};
    use tempfile::tempdir;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn pair(classes: &[&str]) -> (TfidfVectorizer, ClassifierArtifact) {
        let vectorizer = TfidfVectorizer::fit(
            &["verify your account", "lunch on friday"],
            &VectorizerConfig::default(),
        )
        .unwrap();
        let dim = vectorizer.dimension();
        let classifier = ClassifierArtifact::LogisticRegression(LinearModel {
            classes: labels(classes),
            coef: Array2::zeros((1, dim)),
            intercept: Array1::zeros(1),
        });
        (vectorizer, classifier)
    }

    #[test]
    fn test_class_map_order() {
        let classes = labels(&["PHISHING", "phish"]);
        let map = ClassMap::build(&classes, &labels(&["phish", "PHISHING"])).unwrap();
        assert_eq!(map.phishing_index, 1);
        assert_eq!(map.phishing_label, "phish");
    }

    #[test]
    fn test_class_map_numeric_labels() {
        let map = ClassMap::build(&labels(&["0", "1"]), &labels(&["phish", "PHISHING", "1"])).unwrap();
        assert_eq!(map.phishing_index, 1);
    }

    #[test]
    fn test_class_map_unknown_label_fails() {
        let err = ClassMap::build(&labels(&["ham", "spam"]), &labels(&["phish"])).unwrap_err();
        assert!(matches!(err, ArtifactError::UnknownPhishingLabel { .. }));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let model_path = dir.path().join("phishing_model.json");
        let vect_path = dir.path().join("tfidf_vectorizer.json");

        let (vectorizer, classifier) = pair(&["phish", "safe"]);
        ModelArtifact::save(&vectorizer, &classifier, &model_path, &vect_path).unwrap();

        let artifact = ModelArtifact::load(&model_path, &vect_path, &labels(&["phish"])).unwrap();
        assert_eq!(artifact.class_map.as_ref().unwrap().phishing_index, 0);
        assert_eq!(artifact.metadata.classifier_kind, "logistic_regression");
        assert_eq!(artifact.metadata.model_sha256.len(), 64);
        assert_eq!(artifact.metadata.vocabulary_size, vectorizer.dimension());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = ModelArtifact::load(
            dir.path().join("nope.json"),
            dir.path().join("nope2.json"),
            &labels(&["phish"]),
        )
        .unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let model_path = dir.path().join("m.json");
        let vect_path = dir.path().join("v.json");
        fs::write(&model_path, b"not json").unwrap();
        fs::write(&vect_path, b"{}").unwrap();

        let err = ModelArtifact::load(&model_path, &vect_path, &labels(&["phish"])).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let (vectorizer, _) = pair(&["phish", "safe"]);
        let classifier = ClassifierArtifact::LogisticRegression(LinearModel {
            classes: labels(&["phish", "safe"]),
            coef: Array2::zeros((1, vectorizer.dimension() + 3)),
            intercept: Array1::zeros(1),
        });
        let err = ModelArtifact::new(vectorizer, classifier, &labels(&["phish"])).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid(_)));
    }

    #[test]
    fn test_hard_label_model_needs_no_class_map() {
        let (vectorizer, classifier) = pair(&["ham", "spam"]);
        let svc = ClassifierArtifact::LinearSvc(classifier.linear().clone());
        let artifact = ModelArtifact::new(vectorizer, svc, &labels(&["phish"])).unwrap();
        assert!(artifact.class_map.is_none());
    }
}
