//! TF-IDF Vectorizer
//!
//! Word n-gram bag-of-words with smoothed inverse document frequency and L2
//! row normalisation. Fitted offline by the trainer, then persisted as JSON
//! and loaded read-only by the predictor.

use std::collections::{BTreeMap, HashMap, HashSet};

use ndarray::Array1;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ArtifactError;

/// Tokens are runs of two or more word characters
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Inclusive (min, max) n-gram sizes
    pub ngram_range: (usize, usize),
    /// Keep only the most frequent terms across the corpus
    pub max_features: Option<usize>,
    pub lowercase: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: Some(2000),
            lowercase: true,
        }
    }
}

// ============================================================================
// SPARSE ROW
// ============================================================================

/// Sparse document vector, indices strictly increasing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub dim: usize,
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn dot(&self, dense: &Array1<f64>) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(i, v)| dense.get(i).map(|w| w * v))
            .sum()
    }

    pub fn to_dense(&self) -> Array1<f64> {
        let mut dense = Array1::zeros(self.dim);
        for &(i, v) in &self.entries {
            dense[i] = v;
        }
        dense
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// VECTORIZER
// ============================================================================

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub ngram_range: (usize, usize),
    pub lowercase: bool,
    /// Term -> column index
    pub vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from a corpus
    pub fn fit<S: AsRef<str>>(docs: &[S], config: &VectorizerConfig) -> Result<Self, ArtifactError> {
        validate_ngram_range(config.ngram_range)?;

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in docs {
            let mut seen = HashSet::new();
            for gram in analyze(doc.as_ref(), config.lowercase, config.ngram_range) {
                *term_freq.entry(gram.clone()).or_default() += 1;
                if seen.insert(gram.clone()) {
                    *doc_freq.entry(gram).or_default() += 1;
                }
            }
        }

        if term_freq.is_empty() {
            return Err(ArtifactError::EmptyVocabulary);
        }

        // Most frequent first, ties alphabetical so fitting is deterministic
        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max) = config.max_features {
            ranked.truncate(max);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = docs.len() as f64;
        let idf = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms.into_iter().enumerate().map(|(i, t)| (t, i)).collect();

        Ok(Self {
            ngram_range: config.ngram_range,
            lowercase: config.lowercase,
            vocabulary,
            idf,
        })
    }

    /// Number of output columns
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Check internal consistency after deserialisation
    pub fn validate(&self) -> Result<(), ArtifactError> {
        validate_ngram_range(self.ngram_range)?;

        if self.vocabulary.is_empty() {
            return Err(ArtifactError::EmptyVocabulary);
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(ArtifactError::Invalid(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }

        let mut used = vec![false; self.idf.len()];
        for (term, &index) in &self.vocabulary {
            match used.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(ArtifactError::Invalid(format!(
                        "term {:?} has duplicate or out-of-range index {}",
                        term, index
                    )))
                }
            }
        }

        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::Invalid("idf contains non-finite weights".to_string()));
        }

        Ok(())
    }

    /// Transform one document into a normalised sparse tf-idf row
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in analyze(doc, self.lowercase, self.ngram_range) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .filter_map(|(i, tf)| self.idf.get(i).map(|idf| (i, tf * idf)))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= norm;
            }
        }

        SparseVector { dim: self.dimension(), entries }
    }

    pub fn transform_dense(&self, doc: &str) -> Array1<f64> {
        self.transform(doc).to_dense()
    }
}

fn validate_ngram_range((min, max): (usize, usize)) -> Result<(), ArtifactError> {
    if min == 0 || min > max {
        return Err(ArtifactError::Invalid(format!("bad ngram range ({}, {})", min, max)));
    }
    Ok(())
}

/// Split a document into word n-grams
pub fn analyze(doc: &str, lowercase: bool, (min_n, max_n): (usize, usize)) -> Vec<String> {
    let doc = if lowercase { doc.to_lowercase() } else { doc.to_string() };
    let tokens: Vec<&str> = TOKEN_RE.find_iter(&doc).map(|m| m.as_str()).collect();

    let mut grams = Vec::new();
    for n in min_n..=max_n {
        if n == 0 || n > tokens.len() {
            continue;
        }
        grams.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    grams
}
