//! Design agent core
//!
//! Turns a user message (plus optional history) into a templated reply:
//! - `knowledge` - the static Objexis knowledge base
//! - `relevance` - message normalization and entry scoring
//! - `intent` - keyword-driven template selection
//! - `phrases` - fragment pools sampled for concept pitches
//! - `conversation` - caller-supplied history turns
//! - `synthesizer` - per-intent reply templates
//!
//! The agent holds no per-request state; one instance is shared by all
//! handlers.

pub mod conversation;
pub mod intent;
pub mod knowledge;
pub mod phrases;
pub mod relevance;
pub mod synthesizer;

pub use conversation::{History, HistoryTurn, Role};
pub use intent::{Intent, IntentClassifier};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use phrases::Phrasebook;
pub use relevance::{rank, Relevance};
pub use synthesizer::Synthesizer;

use crate::errors::{AppError, Result};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Maximum number of sources attached to a reply
pub const MAX_SOURCES: usize = 3;

/// Knowledge entry surfaced alongside a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Source {
    pub title: &'static str,
    pub excerpt: &'static str,
}

impl From<&KnowledgeEntry> for Source {
    fn from(entry: &KnowledgeEntry) -> Self {
        Self {
            title: entry.title,
            excerpt: entry.excerpt,
        }
    }
}

/// Result of one agent turn
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub intent: Intent,
    pub reply: String,
    pub sources: Vec<Source>,
    /// True when no entry scored and the leading entries were used instead
    pub fallback: bool,
}

/// Stateless design agent
#[derive(Debug, Clone)]
pub struct DesignAgent {
    knowledge: KnowledgeBase,
    classifier: IntentClassifier,
    synthesizer: Synthesizer,
}

impl DesignAgent {
    pub fn new(knowledge: KnowledgeBase, phrases: Phrasebook) -> Self {
        Self {
            knowledge,
            classifier: IntentClassifier::default(),
            synthesizer: Synthesizer::new(phrases),
        }
    }

    /// Agent backed by the built-in knowledge base and phrase pools
    pub fn builtin() -> Self {
        Self::new(KnowledgeBase::builtin(), Phrasebook::builtin())
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer a message using the thread-local RNG
    pub fn respond(&self, message: &str, history: &History) -> Result<AgentReply> {
        self.respond_with(message, history, &mut rand::thread_rng())
    }

    /// Answer a message with an explicit randomness source
    pub fn respond_with<R: Rng + ?Sized>(
        &self,
        message: &str,
        history: &History,
        rng: &mut R,
    ) -> Result<AgentReply> {
        if self.knowledge.is_empty() {
            return Err(AppError::internal("knowledge base has no entries"));
        }

        let relevance = rank(message, &self.knowledge);
        let intent = self.classifier.classify(message);

        debug!(
            intent = %intent,
            matched = relevance.matched().len(),
            fallback = relevance.is_fallback(),
            history_supplied = !history.is_absent(),
            "Composing agent reply"
        );

        let context = relevance.context();
        let reply = self.synthesizer.compose(intent, context, history, rng)?;
        let sources = context
            .iter()
            .take(MAX_SOURCES)
            .map(|entry| Source::from(*entry))
            .collect();

        Ok(AgentReply {
            intent,
            reply,
            sources,
            fallback: relevance.is_fallback(),
        })
    }
}

impl Default for DesignAgent {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::knowledge::{DESIGN_DNA, PRINT_ENGINEERING, SIGNATURE_COLLECTIONS, WORLDBUILDING};
    use super::synthesizer::{
        CONCEPT_HEADER_PREFIX, CONVERSATION_CONTEXT_HEADING, NEXT_ACTIONS_HEADING,
        PRINT_PRIORITIES_HEADING,
    };
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn titles(reply: &AgentReply) -> Vec<&'static str> {
        reply.sources.iter().map(|source| source.title).collect()
    }

    #[test]
    fn test_greeting_uses_fallback() {
        let agent = DesignAgent::builtin();
        let reply = agent.respond("hello", &History::default()).unwrap();

        assert_eq!(reply.intent, Intent::Default);
        assert!(reply.fallback);
        assert_eq!(titles(&reply), vec![DESIGN_DNA, PRINT_ENGINEERING]);
        assert!(reply.reply.starts_with("Objexis approaches every toy vehicle"));
    }

    #[test]
    fn test_concept_request() {
        let agent = DesignAgent::builtin();
        let mut rng = StdRng::seed_from_u64(11);
        let reply = agent
            .respond_with("Design a hypercar for the NovaLux collection", &History::default(), &mut rng)
            .unwrap();

        assert_eq!(reply.intent, Intent::Concept);
        assert!(!reply.fallback);
        assert_eq!(titles(&reply)[0], SIGNATURE_COLLECTIONS);
        assert!(titles(&reply).contains(&WORLDBUILDING));
        assert!(reply.reply.starts_with(CONCEPT_HEADER_PREFIX));
        assert!(!reply.reply.contains(CONVERSATION_CONTEXT_HEADING));
    }

    #[test]
    fn test_strategy_request() {
        let agent = DesignAgent::builtin();
        let reply = agent
            .respond("What's the print manufacturing workflow?", &History::default())
            .unwrap();

        assert_eq!(reply.intent, Intent::Strategy);
        assert_eq!(titles(&reply), vec![PRINT_ENGINEERING]);
        assert!(reply.reply.starts_with(PRINT_PRIORITIES_HEADING));
        assert!(reply.reply.contains(NEXT_ACTIONS_HEADING));
    }

    #[test]
    fn test_sources_capped() {
        // Matches every entry
        let agent = DesignAgent::builtin();
        let reply = agent
            .respond("signature print lore novalux", &History::default())
            .unwrap();
        assert_eq!(reply.sources.len(), MAX_SOURCES);
    }

    #[test]
    fn test_history_is_quoted_in_concepts() {
        let agent = DesignAgent::builtin();
        let history = History::from(vec![
            HistoryTurn::user("I like chrome"),
            HistoryTurn::assistant("Noted."),
        ]);
        let reply = agent.respond("sketch a car", &history).unwrap();

        assert!(reply
            .reply
            .ends_with("**Conversation Context**\nYou: I like chrome • Agent: Noted."));
    }

    #[test]
    fn test_malformed_history_only_fails_concepts() {
        let agent = DesignAgent::builtin();
        let history = History::from(serde_json::json!("yesterday"));

        let reply = agent.respond("hello", &history).unwrap();
        assert_eq!(reply.intent, Intent::Default);

        let reply = agent.respond("What's your print workflow?", &history).unwrap();
        assert_eq!(reply.intent, Intent::Strategy);

        assert!(agent.respond("sketch a car", &history).is_err());
    }

    #[test]
    fn test_empty_knowledge_base_is_internal_error() {
        let agent = DesignAgent::new(KnowledgeBase::new(&[]), Phrasebook::builtin());
        let err = agent.respond("hello", &History::default()).unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_source_serialization() {
        let kb = KnowledgeBase::builtin();
        let source = Source::from(kb.find(DESIGN_DNA).unwrap());
        let json = serde_json::to_value(source).unwrap();
        assert_eq!(json["title"], DESIGN_DNA);
        assert!(json.get("keywords").is_none());
    }
}
