//! Phrase pools sampled when composing replies, plus the chat widget intro.

/// Opening line the chat widget shows before the first message
pub const WELCOME_MESSAGE: &str = "I'm the Objexis design intelligence. Ask me to craft new vehicles, outline 3D print strategies, or expand our future automotive universe.";

/// Suggested first prompts for the chat widget
pub const STARTER_PROMPTS: &[&str] = &[
    "Propose a limited-run hypercar for our NovaLux collection.",
    "Outline a 3D-print ready chassis and wheel system brief.",
    "Build a narrative for the Luminae street racing universe.",
];

const CREATIVE_ADJECTIVES: &[&str] = &[
    "liquid-laminar",
    "holographic",
    "architectural",
    "kinetic",
    "halo-bent",
    "plasma-cooled",
    "aerostatic",
];

const VEHICLE_ARCHETYPES: &[&str] = &[
    "hyper grand tourer",
    "urban glider",
    "dynastic racer",
    "gravity-skimming cruiser",
    "collector-grade halo car",
    "modular scout rover",
    "aerofoil roadster",
];

const COLLECTION_ENVIRONMENTS: &[&str] = &[
    "suspended expressways above bioluminescent oceans",
    "orbital night markets orbiting a twin-moon colony",
    "mirror dunes charged with aurora storms",
    "subterranean skylight caverns filled with reflective fog",
    "vertical racing spires slicing through megacity skylines",
];

const PRINT_RECOMMENDATIONS: &[&str] = &[
    "Orient the chassis at a 35° angle to preserve leading-edge fidelity without sacrificial supports.",
    "Use a two-part snap tab beneath the cockpit to lock the upper shell without adhesives.",
    "Hollow the interior down to 1.2 mm walls with relief escape valves hidden behind the diffuser.",
    "Embed channels for 1.5 mm fiber optic strands to deliver dramatic lighting after assembly.",
];

const STORY_BEATS: &[&str] = &[
    "Each vehicle carries an onboard archive crystal that records pivotal races for future generations.",
    "The propulsion core is tuned to the culture's ceremonial frequencies, creating a resonant glow.",
    "Modular aero petals deploy in response to the city's evolving microclimates.",
    "Wheel halos act as diplomatic signatures, glowing differently when entering allied or rival territories.",
    "Cockpit interiors double as gallery spaces for collectible memory artifacts.",
];

/// Named phrase pools used by the synthesizer
#[derive(Debug, Clone, Copy)]
pub struct Phrasebook {
    pub adjectives: &'static [&'static str],
    pub archetypes: &'static [&'static str],
    pub environments: &'static [&'static str],
    pub print_notes: &'static [&'static str],
    pub story_beats: &'static [&'static str],
}

impl Phrasebook {
    /// The studio's built-in pools
    pub fn builtin() -> Self {
        Self {
            adjectives: CREATIVE_ADJECTIVES,
            archetypes: VEHICLE_ARCHETYPES,
            environments: COLLECTION_ENVIRONMENTS,
            print_notes: PRINT_RECOMMENDATIONS,
            story_beats: STORY_BEATS,
        }
    }
}

impl Default for Phrasebook {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_cover_sampling_sizes() {
        // Concept replies draw two adjectives and two print notes
        let book = Phrasebook::builtin();
        assert!(book.adjectives.len() >= 2);
        assert!(book.print_notes.len() >= 2);
        assert!(!book.archetypes.is_empty());
        assert!(!book.environments.is_empty());
        assert!(!book.story_beats.is_empty());
    }

    #[test]
    fn test_starter_prompts() {
        assert_eq!(STARTER_PROMPTS.len(), 3);
        assert!(STARTER_PROMPTS.iter().any(|p| p.contains("NovaLux")));
    }
}
