//! Degraded-mode tag extraction from text that is not recoverable JSON.

use super::model::{CleanObjectEntry, Confidence};
use super::policy::NamePolicy;
use super::sanitizer::SeenNames;

/// Commas, semicolons, colons, line breaks, and inline bullet markers.
#[inline]
const fn is_delimiter(c: char) -> bool {
    matches!(
        c,
        ',' | ';' | ':' | '\r' | '\n' | '|' | '\u{2022}' | '\u{00b7}' | '\u{25aa}' | '\u{25cf}'
    )
}

/// Payload scaffolding that leaks into fragments when JSON is truncated.
const STRUCTURAL_TOKENS: &[&str] = &[
    "name",
    "confidence",
    "caption",
    "objects",
    "low",
    "medium",
    "high",
];

const EDGE_CHARS: &[char] = &['"', '\'', '`', '[', ']', '{', '}', '(', ')', '.', '!', '?'];

/// Limits applied by [`extract_fallback`].
#[derive(Debug, Clone, Copy)]
pub struct FallbackLimits {
    pub max_objects: usize,
    pub max_fragment_chars: usize,
    pub confidence: Confidence,
}

impl Default for FallbackLimits {
    fn default() -> Self {
        Self {
            max_objects: 25,
            max_fragment_chars: 40,
            confidence: Confidence::Low,
        }
    }
}

/// Split free text into a short, deduplicated tag list.
///
/// Every surviving fragment gets `limits.confidence`. Fragments that are too
/// long, mention `json`, or fail the name policy are dropped.
#[must_use]
pub fn extract_fallback(
    text: &str,
    policy: &NamePolicy,
    limits: FallbackLimits,
) -> Vec<CleanObjectEntry> {
    let mut seen = SeenNames::default();
    let mut out = Vec::new();

    for fragment in text.split(is_delimiter) {
        if out.len() >= limits.max_objects {
            break;
        }
        let Some(name) = clean_fragment(fragment) else {
            continue;
        };
        if name.chars().count() > limits.max_fragment_chars {
            continue;
        }
        let lowered = name.to_lowercase();
        if lowered.contains("json") || STRUCTURAL_TOKENS.contains(&lowered.as_str()) {
            continue;
        }
        if policy.check(name).is_err() {
            continue;
        }
        if !seen.insert(name) {
            continue;
        }
        out.push(CleanObjectEntry {
            name: name.to_string(),
            confidence: limits.confidence,
        });
    }

    out
}

fn clean_fragment(fragment: &str) -> Option<&str> {
    let trimmed = strip_list_marker(fragment.trim());
    let cleaned = trimmed.trim_matches(EDGE_CHARS).trim();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Strip a leading list marker: `-`, `*`, `+`, or numbering like `1.` / `2)`.
fn strip_list_marker(text: &str) -> &str {
    let bullets = text.trim_start_matches(['-', '*', '+']);
    if bullets.len() != text.len() {
        return bullets.trim_start();
    }
    let digits = text.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() != text.len() {
        if let Some(rest) = digits.strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
    }
    text
}
