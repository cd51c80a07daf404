//! Intent classifier - picks the reply template for a message
//!
//! Keyword substring checks on the normalized message, first match wins:
//! concept keywords, then strategy keywords, then the default template.

use super::relevance::normalize;
use std::fmt;

/// Coarse request category selecting the reply template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Pitch a new vehicle concept
    Concept,
    /// Print and production strategy
    Strategy,
    /// General introduction
    Default,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Concept => "concept",
            Intent::Strategy => "strategy",
            Intent::Default => "default",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CONCEPT_KEYWORDS: &[&str] = &[
    "design", "concept", "vehicle", "car", "create", "invent", "hypercar", "sketch",
];

const STRATEGY_KEYWORDS: &[&str] = &[
    "print", "manufacture", "workflow", "strategy", "process", "pipeline", "plan",
];

/// Keyword-driven intent classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    concept_keywords: &'static [&'static str],
    strategy_keywords: &'static [&'static str],
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self {
            concept_keywords: CONCEPT_KEYWORDS,
            strategy_keywords: STRATEGY_KEYWORDS,
        }
    }
}

impl IntentClassifier {
    /// Classify a raw message
    pub fn classify(&self, message: &str) -> Intent {
        let normalized = normalize(message);

        if Self::mentions_any(&normalized, self.concept_keywords) {
            return Intent::Concept;
        }

        if Self::mentions_any(&normalized, self.strategy_keywords) {
            return Intent::Strategy;
        }

        Intent::Default
    }

    fn mentions_any(normalized: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| normalized.contains(keyword))
    }
}
