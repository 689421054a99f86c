/// JSON recovery ladder — reconstructs `{caption, objects}` from generator text.
///
/// The generator is asked for one JSON object but routinely returns it quoted,
/// double-escaped, or buried in prose. Recovery tries a fixed sequence of
/// strategies and stops at the first one that produces a structurally valid
/// payload.
///
/// Key invariants:
/// - Strategies run in ladder order; the first success wins, nothing is merged.
/// - "Valid" means an object whose `objects` field is an array.
/// - Quoted-string unwrapping recurses into the full ladder, bounded by depth.
/// - Same input always produces the same output.
use memchr::{memchr, memmem, memrchr};

use super::model::ParsedPayload;
use super::normalize::normalize;

/// Default bound for nested quoted-string unwraps.
pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 5;

/// Escaped-quote markers that indicate the text is a serialized string
/// rather than raw JSON. Escaped field names such as `\"objects` or
/// `\"confidence` are covered by the first marker.
const ESCAPE_MARKERS: &[&[u8]] = &[b"\\\"", b"\\'"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Depth {
    current: usize,
    max: usize,
}

impl Depth {
    const fn descend(self) -> Option<Self> {
        if self.current >= self.max {
            None
        } else {
            Some(Self {
                current: self.current + 1,
                max: self.max,
            })
        }
    }
}

type Strategy = fn(&str, Depth) -> Option<ParsedPayload>;

/// Ladder order is part of the contract.
const LADDER: &[(&str, Strategy)] = &[
    ("direct", parse_direct),
    ("quoted_unwrap", parse_quoted_unwrap),
    ("escape_repair", parse_escape_repair),
    ("brace_extract", parse_brace_extract),
];

/// A recovered payload together with the name of the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub payload: ParsedPayload,
    pub strategy: &'static str,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Recover a payload from `text` with the default unwrap depth.
///
/// Returns `None` when no strategy yields a valid payload; callers treat that
/// as the normal "not JSON" outcome, not as an error.
#[must_use]
pub fn recover(text: &str) -> Option<ParsedPayload> {
    recover_traced(text, DEFAULT_MAX_UNWRAP_DEPTH).map(|recovered| recovered.payload)
}

/// Recover a payload and report which ladder step succeeded.
#[must_use]
pub fn recover_traced(text: &str, max_unwrap_depth: usize) -> Option<Recovered> {
    let depth = Depth {
        current: 0,
        max: max_unwrap_depth,
    };
    let recovered = run_ladder(text, depth);
    match &recovered {
        Some(found) => tracing::debug!(
            strategy = found.strategy,
            objects = found.payload.objects.len(),
            "recovered structured payload"
        ),
        None => tracing::debug!(bytes = text.len(), "no recovery strategy matched"),
    }
    recovered
}

fn run_ladder(text: &str, depth: Depth) -> Option<Recovered> {
    LADDER.iter().find_map(|&(name, strategy)| {
        strategy(text, depth).map(|payload| Recovered {
            payload,
            strategy: name,
        })
    })
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn parse_direct(text: &str, _depth: Depth) -> Option<ParsedPayload> {
    parse_payload(text)
}

/// Text fully wrapped in one pair of `"` or `'` is read as a string literal
/// and the ladder restarts on the literal's contents.
fn parse_quoted_unwrap(text: &str, depth: Depth) -> Option<ParsedPayload> {
    let trimmed = text.trim();
    let quote = wrapping_quote(trimmed)?;
    let next = depth.descend()?;

    let inner = if quote == '"' {
        match serde_json::from_str::<String>(trimmed) {
            Ok(inner) => inner,
            Err(_) => normalize(strip_quotes(trimmed)).into_owned(),
        }
    } else {
        normalize(strip_quotes(trimmed)).into_owned()
    };

    run_ladder(&inner, next).map(|recovered| recovered.payload)
}

fn parse_escape_repair(text: &str, _depth: Depth) -> Option<ParsedPayload> {
    if !has_escape_markers(text) {
        return None;
    }
    parse_payload(&normalize(text))
}

/// Slice from the first `{` to the last `}` and parse that, raw then normalized.
fn parse_brace_extract(text: &str, _depth: Depth) -> Option<ParsedPayload> {
    let bytes = text.as_bytes();
    let open = memchr(b'{', bytes)?;
    let close = memrchr(b'}', bytes)?;
    if open >= close {
        return None;
    }
    // Both delimiters are ASCII, so the slice is on char boundaries.
    let candidate = &text[open..=close];
    parse_payload(candidate).or_else(|| parse_payload(&normalize(candidate)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[inline]
fn parse_payload(text: &str) -> Option<ParsedPayload> {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(ParsedPayload::from_value)
}

#[inline]
fn wrapping_quote(trimmed: &str) -> Option<char> {
    let bytes = trimmed.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    match (bytes[0], bytes[bytes.len() - 1]) {
        (b'"', b'"') => Some('"'),
        (b'\'', b'\'') => Some('\''),
        _ => None,
    }
}

#[inline]
fn strip_quotes(trimmed: &str) -> &str {
    &trimmed[1..trimmed.len() - 1]
}

#[inline]
fn has_escape_markers(text: &str) -> bool {
    let bytes = text.as_bytes();
    ESCAPE_MARKERS
        .iter()
        .any(|marker| memmem::find(bytes, marker).is_some())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
