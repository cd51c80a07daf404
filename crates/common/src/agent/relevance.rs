//! Relevance scoring of knowledge entries against a user message
//!
//! Scoring is plain substring containment on a normalized message:
//! - +3 for every entry keyword found in the message
//! - +0.5 for every lowercased title token found in the message
//!
//! There is no stemming and no word-boundary check, so "car" also matches
//! inside "scar" and overlapping keywords are counted twice.

use super::knowledge::{KnowledgeBase, KnowledgeEntry};
use regex_lite::Regex;
use std::sync::OnceLock;

/// Points per matching keyword
pub const KEYWORD_WEIGHT: f64 = 3.0;

/// Points per matching title token
pub const TITLE_TOKEN_WEIGHT: f64 = 0.5;

/// Entries used as context when nothing matches
pub const FALLBACK_ENTRIES: usize = 2;

fn disallowed_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("static pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// Lowercase, replace anything outside `[a-z0-9]`/whitespace with a space,
/// collapse whitespace and trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = disallowed_chars().replace_all(&lowered, " ");
    whitespace_runs().replace_all(&stripped, " ").trim().to_string()
}

/// Score a raw message against one entry
pub fn score_entry(message: &str, entry: &KnowledgeEntry) -> f64 {
    score_normalized(&normalize(message), entry)
}

fn score_normalized(normalized: &str, entry: &KnowledgeEntry) -> f64 {
    let keyword_hits = entry
        .keywords
        .iter()
        .filter(|keyword| normalized.contains(*keyword))
        .count();

    let title = entry.title.to_lowercase();
    let title_hits = title
        .split(' ')
        .filter(|token| normalized.contains(token))
        .count();

    keyword_hits as f64 * KEYWORD_WEIGHT + title_hits as f64 * TITLE_TOKEN_WEIGHT
}

/// A knowledge entry with its relevance score
#[derive(Debug, Clone, Copy)]
pub struct ScoredEntry {
    pub entry: &'static KnowledgeEntry,
    pub score: f64,
}

/// Ranked relevance of the knowledge base for one message
#[derive(Debug, Clone)]
pub struct Relevance {
    matched: Vec<ScoredEntry>,
    context: Vec<&'static KnowledgeEntry>,
}

impl Relevance {
    /// Entries with a positive score, best first
    pub fn matched(&self) -> &[ScoredEntry] {
        &self.matched
    }

    /// Entries used to fill templates: the matches, or the fallback pair
    pub fn context(&self) -> &[&'static KnowledgeEntry] {
        &self.context
    }

    /// True when nothing scored and the fallback pair is in use
    pub fn is_fallback(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Score every entry, drop zero scores and sort best first.
///
/// Ties keep declaration order. When nothing scores, the context falls back
/// to the first two entries of the knowledge base.
pub fn rank(message: &str, knowledge: &KnowledgeBase) -> Relevance {
    let normalized = normalize(message);

    let mut matched: Vec<ScoredEntry> = knowledge
        .entries()
        .iter()
        .map(|entry| ScoredEntry {
            entry,
            score: score_normalized(&normalized, entry),
        })
        .filter(|scored| scored.score > 0.0)
        .collect();

    // Stable sort keeps declaration order among equal scores
    matched.sort_by(|a, b| b.score.total_cmp(&a.score));

    let context = if matched.is_empty() {
        knowledge.leading(FALLBACK_ENTRIES)
    } else {
        matched.iter().map(|scored| scored.entry).collect()
    };

    Relevance { matched, context }
}
