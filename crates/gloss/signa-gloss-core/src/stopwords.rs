//! Spanish function words removed before glossing.
//!
//! Four disjoint, lower-case lists. Matching is exact (no stemming); callers
//! lower-case input first.

use serde::{Deserialize, Serialize};

pub const ARTICLES: &[&str] = &["el", "la", "los", "las", "un", "una", "unos", "unas"];

pub const PREPOSITIONS: &[&str] = &[
    "de", "para", "con", "en", "a", "por", "sin", "sobre", "entre", "desde", "hasta",
];

pub const CONNECTORS: &[&str] = &["y", "e", "o", "u", "pero", "mas", "sino", "que"];

/// Present-tense forms of *ser* and *estar*.
pub const COPULAS: &[&str] = &[
    "soy", "eres", "es", "somos", "sois", "son", "estoy", "estás", "está", "estamos", "estáis",
    "están",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopWordClass {
    Article,
    Preposition,
    Connector,
    Copula,
}

impl StopWordClass {
    pub const ALL: [StopWordClass; 4] = [
        StopWordClass::Article,
        StopWordClass::Preposition,
        StopWordClass::Connector,
        StopWordClass::Copula,
    ];

    pub fn words(self) -> &'static [&'static str] {
        match self {
            StopWordClass::Article => ARTICLES,
            StopWordClass::Preposition => PREPOSITIONS,
            StopWordClass::Connector => CONNECTORS,
            StopWordClass::Copula => COPULAS,
        }
    }
}

/// Which list, if any, a lower-case word belongs to.
pub fn classify(word: &str) -> Option<StopWordClass> {
    StopWordClass::ALL
        .into_iter()
        .find(|class| class.words().contains(&word))
}

#[inline]
pub fn is_stop_word(word: &str) -> bool {
    classify(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lists_are_disjoint() {
        let mut seen = HashSet::new();
        for class in StopWordClass::ALL {
            for w in class.words() {
                assert!(seen.insert(*w), "'{w}' appears in more than one list");
            }
        }
    }

    #[test]
    fn classify_is_exact_and_case_sensitive() {
        assert_eq!(classify("los"), Some(StopWordClass::Article));
        assert_eq!(classify("está"), Some(StopWordClass::Copula));
        assert_eq!(classify("esta"), None);
        assert_eq!(classify("El"), None);
        assert!(!is_stop_word("come"));
    }
}
