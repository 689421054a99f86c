//! Locating the generator's text inside loosely shaped upstream envelopes.

use serde_json::Value;

/// A place inside an envelope that may hold the generator's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    /// A top-level string field.
    Top(&'static str),
    /// Chat-completion shape: `choices[0].message.content`.
    FirstChoiceMessage,
}

/// Fields are scanned in this order; the first non-empty string wins.
pub const CANDIDATE_FIELDS: &[CandidateField] = &[
    CandidateField::Top("response"),
    CandidateField::Top("result"),
    CandidateField::Top("output"),
    CandidateField::Top("output_text"),
    CandidateField::Top("text"),
    CandidateField::Top("content"),
    CandidateField::FirstChoiceMessage,
];

impl CandidateField {
    /// The string at this field, if the envelope has one.
    #[must_use]
    pub fn lookup(self, envelope: &Value) -> Option<&str> {
        match self {
            Self::Top(key) => envelope.get(key)?.as_str(),
            Self::FirstChoiceMessage => envelope
                .get("choices")?
                .get(0)?
                .get("message")?
                .get("content")?
                .as_str(),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top(key) => key,
            Self::FirstChoiceMessage => "choices[0].message.content",
        }
    }
}

/// Resolve the raw text blob from an upstream value.
///
/// A JSON string is itself the blob. Objects are scanned through
/// [`CANDIDATE_FIELDS`]; whitespace-only strings count as empty.
#[must_use]
pub fn resolve_blob(input: &Value) -> Option<&str> {
    if let Value::String(text) = input {
        return non_empty(text);
    }
    CANDIDATE_FIELDS.iter().find_map(|field| {
        let text = field.lookup(input).and_then(non_empty)?;
        tracing::trace!(field = field.label(), "resolved text blob from envelope");
        Some(text)
    })
}

#[inline]
fn non_empty(text: &str) -> Option<&str> {
    (!text.trim().is_empty()).then_some(text)
}
