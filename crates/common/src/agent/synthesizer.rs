//! Reply synthesizer - fills the per-intent templates
//!
//! Provides:
//! - Concept pitches assembled from randomly sampled phrase fragments
//! - Strategy briefs built from whichever knowledge entries matched
//! - A default introduction listing the leading context entries
//!
//! Sampling is without replacement within each pool. Production callers pass
//! an unseeded RNG, so identical prompts get different wording.

use super::conversation::{History, HistoryTurn};
use super::intent::Intent;
use super::knowledge::{KnowledgeEntry, DESIGN_DNA, PRINT_ENGINEERING, WORLDBUILDING};
use super::phrases::Phrasebook;
use crate::errors::{AppError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

pub const CONCEPT_HEADER_PREFIX: &str = "### Concept:";
pub const DESIGN_ANCHORS_HEADING: &str = "**Design DNA Anchors**";
pub const EXTERIOR_HEADING: &str = "**Exterior Sculpting**";
pub const LIGHTING_HEADING: &str = "**Signature Lighting**";
pub const INTERIOR_HEADING: &str = "**Interior & Experience**";
pub const PRINT_STRATEGY_HEADING: &str = "**3D Print Strategy**";
pub const CONVERSATION_CONTEXT_HEADING: &str = "**Conversation Context**";
pub const PRINT_PRIORITIES_HEADING: &str = "**Print Engineering Priorities**";
pub const WORLDBUILDING_HOOKS_HEADING: &str = "**Worldbuilding Hooks**";
pub const DESIGN_CONSISTENCY_HEADING: &str = "**Design Consistency**";
pub const NEXT_ACTIONS_HEADING: &str = "**Next Actions**";
pub const COLLABORATION_HEADING: &str = "**How to collaborate with the agent**";

/// Separator between quoted history turns
pub const TURN_SEPARATOR: &str = " • ";

/// Number of trailing history turns quoted in concept replies
pub const HISTORY_WINDOW: usize = 2;

const SECTION_SEPARATOR: &str = "\n\n";

const INTERIOR_BODY: &str = "A suspended capsule cockpit wrapped in translucent shielding panels. Seat shells pivot outward for display-mode staging, while embedded memory shards narrate the vehicle's origin story.";

const NEXT_ACTIONS: &[&str] = &[
    "Prepare greybox volumes in CAD with modular separation lines.",
    "Prototype lighting channels using translucent resin inserts.",
    "Draft a narrative capsule summarising the vehicle's universe placement.",
];

const DEFAULT_INTRO: &str = "Objexis approaches every toy vehicle as an original collectible fused with futurist engineering.";
const DEFAULT_LEAD_IN: &str = "Here's how we can move your idea forward:";

const COLLABORATION_TIPS: &[&str] = &[
    "Ask for a concept pitch with desired themes or materials.",
    "Request a print feasibility breakdown for resin or FDM workflows.",
    "Explore worldbuilding to connect vehicles into a unified universe.",
];

/// Template-driven reply builder
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    phrases: Phrasebook,
}

impl Synthesizer {
    pub fn new(phrases: Phrasebook) -> Self {
        Self { phrases }
    }

    /// Build the reply for `intent` from the ranked context entries
    pub fn compose<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        context: &[&'static KnowledgeEntry],
        history: &History,
        rng: &mut R,
    ) -> Result<String> {
        match intent {
            Intent::Concept => self.concept(context, history, rng),
            Intent::Strategy => Ok(strategy(context)),
            Intent::Default => Ok(introduction(context)),
        }
    }

    fn concept<R: Rng + ?Sized>(
        &self,
        context: &[&'static KnowledgeEntry],
        history: &History,
        rng: &mut R,
    ) -> Result<String> {
        let history = history.turns()?;
        let adjectives = sample("adjectives", self.phrases.adjectives, 2, rng)?.join(" & ");
        let archetype = sample_one("archetypes", self.phrases.archetypes, rng)?;
        let environment = sample_one("environments", self.phrases.environments, rng)?;
        let story_beat = sample_one("story_beats", self.phrases.story_beats, rng)?;
        let print_notes = sample("print_notes", self.phrases.print_notes, 2, rng)?;

        let dna = find(context, DESIGN_DNA).or_else(|| context.first().copied());
        let tone = dna.map(|entry| entry.tone).unwrap_or("our design language");
        let anchors = dna
            .map(|entry| bullets(entry.pillars.iter().copied()))
            .unwrap_or_default();

        let mut sections = vec![
            format!("{} {} {}", CONCEPT_HEADER_PREFIX, adjectives, archetype),
            format!(
                "Inspired by {}, this response evolves your prompt into a collectible-ready vision. The vehicle is choreographed for {}.",
                tone, environment
            ),
            format!("{}\n{}", DESIGN_ANCHORS_HEADING, anchors),
            format!(
                "{}\nA flowing triple-tier silhouette with {} surfacing. Layered aero planes float off the main fuselage creating negative space windows that channel light directly into the cabin.",
                EXTERIOR_HEADING, adjectives
            ),
            format!(
                "{}\nRibboned photon veins trace along the beltline, shifting hues to signal propulsion states. Leading-edge blades frame the wheels, echoing {}.",
                LIGHTING_HEADING,
                story_beat.to_lowercase()
            ),
            format!("{}\n{}", INTERIOR_HEADING, INTERIOR_BODY),
            format!("{}\n{}", PRINT_STRATEGY_HEADING, bullets(print_notes)),
        ];

        if !history.is_empty() {
            let start = history.len().saturating_sub(HISTORY_WINDOW);
            let tail: Vec<String> = history[start..].iter().map(HistoryTurn::render).collect();
            sections.push(format!(
                "{}\n{}",
                CONVERSATION_CONTEXT_HEADING,
                tail.join(TURN_SEPARATOR)
            ));
        }

        Ok(sections.join(SECTION_SEPARATOR))
    }
}

fn strategy(context: &[&'static KnowledgeEntry]) -> String {
    let mut sections = Vec::new();

    if let Some(engineering) = find(context, PRINT_ENGINEERING) {
        sections.push(format!(
            "{}\n{}",
            PRINT_PRIORITIES_HEADING,
            bullets(engineering.pillars.iter().copied())
        ));
    }

    if let Some(storytelling) = find(context, WORLDBUILDING) {
        sections.push(format!(
            "{}\n{}",
            WORLDBUILDING_HOOKS_HEADING,
            bullets(storytelling.pillars.iter().take(2).copied())
        ));
    }

    if let Some(dna) = find(context, DESIGN_DNA) {
        let consistency = std::iter::once(dna.tone).chain(dna.pillars.first().copied());
        sections.push(format!("{}\n{}", DESIGN_CONSISTENCY_HEADING, bullets(consistency)));
    }

    sections.push(format!(
        "{}\n{}",
        NEXT_ACTIONS_HEADING,
        bullets(NEXT_ACTIONS.iter().copied())
    ));

    sections.join(SECTION_SEPARATOR)
}

fn introduction(context: &[&'static KnowledgeEntry]) -> String {
    let highlights: Vec<String> = context
        .iter()
        .take(2)
        .map(|entry| format!("- {}: {}", entry.title, entry.excerpt))
        .collect();

    [
        DEFAULT_INTRO.to_string(),
        DEFAULT_LEAD_IN.to_string(),
        highlights.join("\n"),
        format!("{}\n{}", COLLABORATION_HEADING, bullets(COLLABORATION_TIPS.iter().copied())),
    ]
    .join(SECTION_SEPARATOR)
}

fn find(context: &[&'static KnowledgeEntry], title: &str) -> Option<&'static KnowledgeEntry> {
    context.iter().copied().find(|entry| entry.title == title)
}

fn bullets<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Up to `amount` distinct fragments from `pool`, in random order
fn sample<R: Rng + ?Sized>(
    name: &str,
    pool: &'static [&'static str],
    amount: usize,
    rng: &mut R,
) -> Result<Vec<&'static str>> {
    if pool.is_empty() {
        return Err(AppError::internal(format!("phrase pool '{}' is empty", name)));
    }
    Ok(pool.choose_multiple(rng, amount).copied().collect())
}

fn sample_one<R: Rng + ?Sized>(
    name: &str,
    pool: &'static [&'static str],
    rng: &mut R,
) -> Result<&'static str> {
    pool.choose(rng)
        .copied()
        .ok_or_else(|| AppError::internal(format!("phrase pool '{}' is empty", name)))
}
