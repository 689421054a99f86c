use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecoveryError;

/// Three-level ordinal label the generator attaches to each object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Parse a label after trimming and lowercasing; `None` for anything else.
    #[must_use]
    pub fn parse_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("low") {
            Some(Self::Low)
        } else if trimmed.eq_ignore_ascii_case("medium") {
            Some(Self::Medium)
        } else if trimmed.eq_ignore_ascii_case("high") {
            Some(Self::High)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload reconstructed by the recovery ladder.
///
/// `objects` is kept as untrusted JSON; only the sanitizer turns it into
/// [`CleanObjectEntry`] values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPayload {
    pub caption: String,
    pub objects: Vec<serde_json::Value>,
}

impl ParsedPayload {
    /// Accept `value` only when it is an object with an `objects` array.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        let serde_json::Value::Object(mut map) = value else {
            return None;
        };
        let serde_json::Value::Array(objects) = map.remove("objects")? else {
            return None;
        };
        let caption = match map.remove("caption") {
            Some(serde_json::Value::String(caption)) => caption.trim().to_string(),
            _ => String::new(),
        };
        Some(Self { caption, objects })
    }

    /// Borrowing variant of [`ParsedPayload::from_value`] for envelopes that
    /// must stay intact for diagnostics.
    #[must_use]
    pub fn from_value_ref(value: &serde_json::Value) -> Option<Self> {
        let map = value.as_object()?;
        let objects = map.get("objects")?.as_array()?.clone();
        let caption = map
            .get("caption")
            .and_then(serde_json::Value::as_str)
            .map(|caption| caption.trim().to_string())
            .unwrap_or_default();
        Some(Self { caption, objects })
    }
}

/// A validated object name with its normalized confidence label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanObjectEntry {
    pub name: String,
    pub confidence: Confidence,
}

/// Which path produced a [`SanitizedResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPath {
    /// The input already carried a structured `objects` array.
    Structured,
    /// A ladder strategy recovered the payload from text.
    Parsed(&'static str),
    /// Structured recovery failed and the plain-text extractor ran.
    Fallback,
    /// No text could be resolved from the input.
    Empty,
}

impl RecoveryPath {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Parsed(strategy) => strategy,
            Self::Fallback => "fallback",
            Self::Empty => "empty",
        }
    }
}

/// Terminal artifact returned to the caller. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizedResult {
    pub ok: bool,
    pub caption: String,
    pub objects: Vec<CleanObjectEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
    #[serde(skip)]
    pub path: RecoveryPath,
}

impl SanitizedResult {
    #[must_use]
    pub(crate) fn success(
        caption: String,
        objects: Vec<CleanObjectEntry>,
        path: RecoveryPath,
        raw: Option<serde_json::Value>,
    ) -> Self {
        Self {
            ok: true,
            caption,
            objects,
            error: None,
            raw,
            path,
        }
    }

    #[must_use]
    pub(crate) fn failure(err: &RecoveryError, raw: serde_json::Value) -> Self {
        Self {
            ok: false,
            caption: String::new(),
            objects: Vec::new(),
            error: Some(err.to_string()),
            raw: Some(raw),
            path: RecoveryPath::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confidence_labels_are_trimmed_and_case_insensitive() {
        assert_eq!(Confidence::parse_label(" HIGH "), Some(Confidence::High));
        assert_eq!(Confidence::parse_label("Medium"), Some(Confidence::Medium));
        assert_eq!(Confidence::parse_label("maybe"), None);
        assert_eq!(Confidence::parse_label(""), None);
    }

    #[test]
    fn confidence_serializes_lowercase() {
        let wire = serde_json::to_value(Confidence::High).unwrap();
        assert_eq!(wire, json!("high"));
        assert_eq!(Confidence::Medium.to_string(), "medium");
    }

    #[test]
    fn payload_requires_objects_array() {
        assert!(ParsedPayload::from_value(json!({"caption": "c"})).is_none());
        assert!(ParsedPayload::from_value(json!({"objects": "a,b"})).is_none());
        assert!(ParsedPayload::from_value(json!(42)).is_none());
        let payload = ParsedPayload::from_value(json!({"objects": []})).unwrap();
        assert_eq!(payload.caption, "");
        assert!(payload.objects.is_empty());
    }

    #[test]
    fn payload_ignores_non_string_caption() {
        let payload = ParsedPayload::from_value(json!({"caption": 7, "objects": [1]})).unwrap();
        assert_eq!(payload.caption, "");
        assert_eq!(payload.objects, vec![json!(1)]);
    }

    #[test]
    fn failure_result_keeps_raw_diagnostic() {
        let result = SanitizedResult::failure(&RecoveryError::EmptyInput, json!({}));
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire["ok"], false);
        assert_eq!(wire["caption"], "");
        assert_eq!(wire["objects"], json!([]));
        assert_eq!(wire["raw"], json!({}));
        assert!(wire["error"].as_str().is_some());
        assert!(wire.get("path").is_none());
    }
}
