//! Text Module - offline cleaning pipeline
//!
//! Letters only, lowercase, stopwords out, nouns lemmatized. Used by the CLI
//! predictor and optionally by the trainer; the web endpoint scores raw text.

pub mod stopwords;
pub mod lemmatizer;

pub use lemmatizer::lemmatize;
pub use stopwords::is_stopword;

/// Clean one email into space-separated lemmas
pub fn clean_text(text: &str) -> String {
    let letters: String = text
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c.to_ascii_lowercase() } else { ' ' })
        .collect();

    letters
        .split_whitespace()
        .filter(|w| !is_stopword(w))
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}
