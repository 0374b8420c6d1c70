//! Heuristic Scorer
//!
//! Rule-based fallback used when no trained model is loaded or when the
//! model fails on a request. Weights are kept in hundredths so the sum is
//! exact and the reported percentage never suffers float truncation.

use serde::{Deserialize, Serialize};

use crate::logic::features::{extract_features, EmailFeatures};
use super::threshold::ThresholdConfig;
use super::types::{Label, PredictionResult, ScoreSource};

/// Per-signal weights, in hundredths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub per_url: u32,
    pub per_urgency_word: u32,
    pub max_urgency_words: usize,
    pub replyto_mismatch: u32,
    pub attachment_phrase: u32,
    pub phone_number: u32,
    pub suspicious_tld: u32,
    pub multiple_addresses: u32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            per_url: 20,
            per_urgency_word: 15,
            max_urgency_words: 3,
            replyto_mismatch: 30,
            attachment_phrase: 20,
            phone_number: 25,
            suspicious_tld: 25,
            multiple_addresses: 10,
        }
    }
}

/// Heuristic output before it is wrapped in a [`PredictionResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicScore {
    /// Clamped score in hundredths (0-100)
    pub percent: u8,
    pub label: Label,
}

impl HeuristicScore {
    /// Score as a probability in [0, 1]
    pub fn probability(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }
}

/// Weighted heuristic scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    weights: HeuristicWeights,
    thresholds: ThresholdConfig,
}

impl HeuristicScorer {
    pub fn new(weights: HeuristicWeights, thresholds: ThresholdConfig) -> Self {
        Self { weights, thresholds }
    }

    /// Raw weighted sum in hundredths, before clamping
    pub fn raw_points(&self, f: &EmailFeatures) -> u64 {
        let w = &self.weights;
        let flag = |on: bool, weight: u32| if on { u64::from(weight) } else { 0 };

        let urls = (f.url_count as u64).saturating_mul(u64::from(w.per_url));
        let urgency = f.urgency_count.min(w.max_urgency_words) as u64 * u64::from(w.per_urgency_word);

        [
            urls,
            urgency,
            flag(f.replyto_mismatch, w.replyto_mismatch),
            flag(f.has_attachment_phrase, w.attachment_phrase),
            flag(f.phone_count > 0, w.phone_number),
            flag(f.suspicious_tld, w.suspicious_tld),
            flag(f.email_count > 1, w.multiple_addresses),
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }

    pub fn score(&self, features: &EmailFeatures) -> HeuristicScore {
        let percent = self.raw_points(features).min(100) as u8;
        HeuristicScore {
            percent,
            label: self.thresholds.classify(ScoreSource::Heuristic, percent),
        }
    }

    pub fn predict(&self, text: &str) -> PredictionResult {
        let score = self.score(&extract_features(text));
        PredictionResult {
            label: score.label,
            score: Some(score.percent),
            source: ScoreSource::Heuristic,
        }
    }
}

/// Score raw text with the default weights
pub fn heuristic_predict(text: &str) -> PredictionResult {
    HeuristicScorer::default().predict(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(features: EmailFeatures) -> HeuristicScore {
        HeuristicScorer::default().score(&features)
    }

    #[test]
    fn test_no_signals_is_safe_zero() {
        let result = score(EmailFeatures {
            email_count: 1,
            ..Default::default()
        });
        assert_eq!(result.percent, 0);
        assert_eq!(result.probability(), 0.0);
        assert_eq!(result.label, Label::Safe);
    }

    #[test]
    fn test_extreme_counts_are_clamped() {
        let result = score(EmailFeatures {
            url_count: usize::MAX,
            email_count: 10_000,
            phone_count: 10_000,
            urgency_count: 10_000,
            has_attachment_phrase: true,
            replyto_mismatch: true,
            suspicious_tld: true,
        });
        assert_eq!(result.percent, 100);
        assert_eq!(result.probability(), 1.0);
        assert_eq!(result.label, Label::Phishing);
    }

    #[test]
    fn test_urgency_capped_at_three() {
        let three = score(EmailFeatures { urgency_count: 3, ..Default::default() });
        let nine = score(EmailFeatures { urgency_count: 9, ..Default::default() });
        assert_eq!(three.percent, 45);
        assert_eq!(nine.percent, 45);
        assert_eq!(three.label, Label::Phishing);
    }

    #[test]
    fn test_threshold_boundary() {
        // two urls = exactly 0.40
        let two_urls = score(EmailFeatures { url_count: 2, ..Default::default() });
        assert_eq!(two_urls.percent, 40);
        assert_eq!(two_urls.label, Label::Phishing);

        // mismatch alone = 0.30
        let mismatch = score(EmailFeatures { replyto_mismatch: true, ..Default::default() });
        assert_eq!(mismatch.percent, 30);
        assert_eq!(mismatch.label, Label::Safe);
    }

    #[test]
    fn test_each_weight() {
        let cases = [
            (EmailFeatures { url_count: 1, ..Default::default() }, 20),
            (EmailFeatures { urgency_count: 1, ..Default::default() }, 15),
            (EmailFeatures { has_attachment_phrase: true, ..Default::default() }, 20),
            (EmailFeatures { phone_count: 4, ..Default::default() }, 25),
            (EmailFeatures { suspicious_tld: true, ..Default::default() }, 25),
            (EmailFeatures { email_count: 2, ..Default::default() }, 10),
        ];
        for (features, expected) in cases {
            assert_eq!(score(features).percent, expected, "{:?}", features);
        }
    }

    #[test]
    fn test_phishing_text() {
        let result =
            heuristic_predict("URGENT: wire transfer now, https://bad.tk/verify, call +1-555-0100");
        assert_eq!(result.label, Label::Phishing);
        assert!(result.score.unwrap() >= 40);
        assert_eq!(result.source, ScoreSource::Heuristic);
    }

    #[test]
    fn test_benign_text() {
        let result = heuristic_predict("Team lunch Friday, see you then.");
        assert_eq!(result.label, Label::Safe);
        assert_eq!(result.score, Some(0));
    }
}
