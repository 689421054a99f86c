//! Name policy: which object names are never allowed into a result.
//!
//! All lookups are keyed by the trimmed, lowercased name.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

/// Placeholder values the generator copies out of the prompt's example.
const JUNK_TOKENS: &[&str] = &["...", "xxx", "object", "objekt"];

/// Fragments of prompt instructions the generator sometimes echoes back
/// instead of a real object name. Matched as substrings.
const INSTRUCTION_ECHOES: &[&str] = &[
    "konkrétní český název",
    "konkretni cesky nazev",
    "český název objektu",
    "název objektu",
    "concrete czech-specific object name",
    "concrete czech object name",
    "concrete czech name",
    "specific object name",
    "object name in czech",
    "name of the object",
    "low|medium|high",
];

/// Non-physical, relational, or scene-level terms. Exact match.
const SEMANTIC_BLACKLIST: &[&str] = &[
    // family relations
    "rodina",
    "matka",
    "otec",
    "máma",
    "táta",
    "syn",
    "dcera",
    "bratr",
    "sestra",
    "babička",
    "dědeček",
    "manžel",
    "manželka",
    "family",
    "mother",
    "father",
    "son",
    "daughter",
    "brother",
    "sister",
    "grandmother",
    "grandfather",
    "husband",
    "wife",
    // vacation / beach / ocean scenes
    "dovolená",
    "prázdniny",
    "pláž",
    "moře",
    "oceán",
    "vlny",
    "pobřeží",
    "letovisko",
    "vacation",
    "holiday",
    "beach",
    "sea",
    "ocean",
    "waves",
    "seaside",
    "coast",
    "resort",
];

/// Names too abstract to be a detected object.
const TOO_ABSTRACT: &[&str] = &[
    "scene",
    "environment",
    "background",
    "situation",
    "scéna",
    "prostředí",
    "pozadí",
    "situace",
];

/// Why a name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Junk,
    InstructionEcho,
    Blacklisted,
    TooAbstract,
}

impl Rejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Junk => "junk_token",
            Self::InstructionEcho => "instruction_echo",
            Self::Blacklisted => "blacklisted",
            Self::TooAbstract => "too_abstract",
        }
    }
}

static BUILTIN: LazyLock<NamePolicy> = LazyLock::new(|| NamePolicy::with_extra(&[]));

/// Immutable set of name rules. Cheap to share across requests.
#[derive(Debug, Clone)]
pub struct NamePolicy {
    junk: FxHashSet<String>,
    blacklist: FxHashSet<String>,
    too_abstract: FxHashSet<String>,
}

impl NamePolicy {
    /// The built-in policy, shared process-wide.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Built-in policy plus caller-supplied blacklist terms.
    #[must_use]
    pub fn with_extra(extra_blacklist: &[String]) -> Self {
        let blacklist = SEMANTIC_BLACKLIST
            .iter()
            .map(|term| (*term).to_string())
            .chain(
                extra_blacklist
                    .iter()
                    .map(|term| term.trim().to_lowercase())
                    .filter(|term| !term.is_empty()),
            )
            .collect();
        Self {
            junk: JUNK_TOKENS.iter().map(|t| (*t).to_string()).collect(),
            blacklist,
            too_abstract: TOO_ABSTRACT.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// Check a trimmed name against every rule, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] that applies.
    pub fn check(&self, trimmed: &str) -> Result<(), Rejection> {
        if trimmed.is_empty() {
            return Err(Rejection::Empty);
        }
        let lowered = trimmed.to_lowercase();
        if self.junk.contains(&lowered) {
            return Err(Rejection::Junk);
        }
        if INSTRUCTION_ECHOES.iter().any(|echo| lowered.contains(echo)) {
            return Err(Rejection::InstructionEcho);
        }
        if self.blacklist.contains(&lowered) {
            return Err(Rejection::Blacklisted);
        }
        if self.too_abstract.contains(&lowered) {
            return Err(Rejection::TooAbstract);
        }
        Ok(())
    }
}
