//! Static Objexis knowledge base
//!
//! Four fixed entries describing the studio's design doctrine. Entries are
//! declared once as `'static` data and never mutated; declaration order matters
//! because the fallback context is the first two entries.

use serde::Serialize;

/// Title of the design-language entry
pub const DESIGN_DNA: &str = "Objexis Design DNA";
/// Title of the print engineering entry
pub const PRINT_ENGINEERING: &str = "Print-Ready Engineering";
/// Title of the worldbuilding entry
pub const WORLDBUILDING: &str = "Collection Worldbuilding";
/// Title of the signature collections entry
pub const SIGNATURE_COLLECTIONS: &str = "Signature Collections";

/// A single design-domain record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KnowledgeEntry {
    /// Unique title
    pub title: &'static str,

    /// One-sentence summary surfaced as a source
    pub excerpt: &'static str,

    /// Literals matched as substrings of the normalized message
    pub keywords: &'static [&'static str],

    /// Ordered design pillars used to fill reply templates
    pub pillars: &'static [&'static str],

    /// Tone line
    pub tone: &'static str,
}

static BUILTIN_ENTRIES: [KnowledgeEntry; 4] = [
    KnowledgeEntry {
        title: DESIGN_DNA,
        excerpt: "Iconic silhouettes with architectural surfacing, floating cabins, and jewel-like lighting signatures.",
        keywords: &[
            "design language",
            "silhouette",
            "signature",
            "lighting",
            "surfacing",
            "form",
            "floating cabin",
        ],
        pillars: &[
            "Balance luxury-inspired proportions with future-tech expression.",
            "Celebrate negative space with suspended cabins and layered aero planes.",
            "Integrate theatrical lighting channels that double as narrative cues.",
        ],
        tone: "Sculptural precision meets cinematic futurism.",
    },
    KnowledgeEntry {
        title: PRINT_ENGINEERING,
        excerpt: "Durable wall thicknesses, modular assemblies, and tolerances optimized for resin and FDM workflows.",
        keywords: &[
            "3d print",
            "print",
            "manufacturing",
            "tolerances",
            "support",
            "assembly",
            "durability",
            "material",
        ],
        pillars: &[
            "Maintain a 1.3-1.8 mm wall thickness baseline for exteriors.",
            "Split bodies into interlocking quadrants with keyed sockets for seamless bonding.",
            "Design wheel wells and lighting channels to print without additional supports when oriented correctly.",
        ],
        tone: "Engineering quiet luxury into dependable, repeatable prints.",
    },
    KnowledgeEntry {
        title: WORLDBUILDING,
        excerpt: "Every lineup lives inside a cohesive fiction: orbital grand tours, luminescent street leagues, or desert aurora rallies.",
        keywords: &[
            "collection",
            "universe",
            "lore",
            "story",
            "narrative",
            "world",
            "campaign",
            "brand",
        ],
        pillars: &[
            "Define atmospheric environments, from mirror-glass megacities to abyssal docking bays.",
            "Develop signature energy sources and propulsion cues expressed through lighting and surface transitions.",
            "Tie wheel architecture and interior geometry to a cultural ritual or narrative moment.",
        ],
        tone: "Emotionally rich, serialized storytelling for collectors.",
    },
    KnowledgeEntry {
        title: SIGNATURE_COLLECTIONS,
        excerpt: "NovaLux hyper GTs, Luminae nocturnal racers, and Heliosyne off-world exploration fleet set the creative benchmarks.",
        keywords: &[
            "novalux",
            "luminae",
            "heliosyne",
            "collection",
            "line",
            "series",
            "skyluxe",
            "atlas",
        ],
        pillars: &[
            "NovaLux: liquid metal surfacing with kinetic crystal lighting veils.",
            "Luminae: split-level chassis with levitating wheel halos for aggressive street silhouettes.",
            "Heliosyne: adaptive geometry with deployable aero petals for multi-terrain missions.",
        ],
        tone: "A repertoire of tomorrow's icons, each with distinct posture.",
    },
];

/// Ordered, read-only collection of knowledge entries
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    entries: &'static [KnowledgeEntry],
}

impl KnowledgeBase {
    /// The studio's built-in knowledge base
    pub fn builtin() -> Self {
        Self::new(&BUILTIN_ENTRIES)
    }

    /// Wrap an arbitrary static entry set
    pub fn new(entries: &'static [KnowledgeEntry]) -> Self {
        Self { entries }
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &'static [KnowledgeEntry] {
        self.entries
    }

    /// Look up an entry by exact title
    pub fn find(&self, title: &str) -> Option<&'static KnowledgeEntry> {
        let entries: &'static [KnowledgeEntry] = self.entries;
        entries.iter().find(|entry| entry.title == title)
    }

    /// First `n` entries in declaration order
    pub fn leading(&self, n: usize) -> Vec<&'static KnowledgeEntry> {
        let entries: &'static [KnowledgeEntry] = self.entries;
        entries.iter().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_order() {
        let kb = KnowledgeBase::builtin();
        let titles: Vec<&str> = kb.entries().iter().map(|e| e.title).collect();
        assert_eq!(
            titles,
            vec![DESIGN_DNA, PRINT_ENGINEERING, WORLDBUILDING, SIGNATURE_COLLECTIONS]
        );
    }

    #[test]
    fn test_titles_unique() {
        let kb = KnowledgeBase::builtin();
        let titles: HashSet<&str> = kb.entries().iter().map(|e| e.title).collect();
        assert_eq!(titles.len(), kb.len());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        // Keywords are matched against a lowercased message
        for entry in KnowledgeBase::builtin().entries() {
            for keyword in entry.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "{}", entry.title);
            }
        }
    }

    #[test]
    fn test_find_and_leading() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.find(WORLDBUILDING).map(|e| e.pillars.len()), Some(3));
        assert!(kb.find("Unknown").is_none());

        let leading = kb.leading(2);
        assert_eq!(leading.len(), 2);
        assert_eq!(leading[1].title, PRINT_ENGINEERING);
    }
}
