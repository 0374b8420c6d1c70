//! Rule-based noun lemmatizer
//!
//! Reduces plural nouns to their singular form with suffix rules and a small
//! irregular table. Not dictionary backed: words the rules cannot safely
//! handle are returned unchanged.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("data", "datum"),
        ("criteria", "criterion"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("leaves", "leaf"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("halves", "half"),
        ("selves", "self"),
    ]
    .into_iter()
    .collect()
});

/// Words ending in `s` that are already lemmas
const UNCHANGED: &[&str] = &[
    "news", "series", "species", "thanks", "means", "always", "perhaps", "whereas", "yes",
    "gas", "lens", "chaos", "ethics", "physics", "politics", "mathematics", "economics",
    "canvas", "atlas", "alias", "bias", "christmas", "sales", "goods", "headquarters",
];

/// Lemmatize one lowercase word
pub fn lemmatize(word: &str) -> String {
    if let Some(lemma) = IRREGULAR.get(word) {
        return lemma.to_string();
    }
    if word.len() <= 3 || UNCHANGED.contains(&word) {
        return word.to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{}ss", stem);
    }
    for suffix in ["xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }

    word.to_string()
}
