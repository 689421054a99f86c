use rustc_hash::FxHashSet;
use serde_json::Value;

use super::model::{CleanObjectEntry, Confidence};
use super::policy::{NamePolicy, Rejection};

/// Case-insensitive first-occurrence-wins name set.
#[derive(Debug, Default)]
pub(crate) struct SeenNames(FxHashSet<String>);

impl SeenNames {
    /// Returns `true` when `name` was not seen before (and records it).
    pub(crate) fn insert(&mut self, name: &str) -> bool {
        self.0.insert(name.to_lowercase())
    }
}

/// Validates, normalizes, filters and deduplicates raw object entries.
#[derive(Debug, Clone, Copy)]
pub struct ObjectSanitizer<'a> {
    policy: &'a NamePolicy,
    default_confidence: Confidence,
}

impl Default for ObjectSanitizer<'static> {
    fn default() -> Self {
        Self::new(NamePolicy::builtin(), Confidence::Low)
    }
}

impl<'a> ObjectSanitizer<'a> {
    #[must_use]
    pub const fn new(policy: &'a NamePolicy, default_confidence: Confidence) -> Self {
        Self {
            policy,
            default_confidence,
        }
    }

    /// Clean a raw `objects` list.
    ///
    /// Total: malformed entries are dropped one by one, never the whole list.
    /// Output keeps input order minus rejected and duplicate entries.
    #[must_use]
    pub fn sanitize(&self, entries: &[Value]) -> Vec<CleanObjectEntry> {
        let mut seen = SeenNames::default();
        let mut cleaned = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match self.clean_entry(entry) {
                Ok(clean) => {
                    if seen.insert(&clean.name) {
                        cleaned.push(clean);
                    } else {
                        tracing::trace!(index, name = %clean.name, "dropped duplicate object");
                    }
                }
                Err(reason) => {
                    tracing::trace!(index, reason, "rejected object entry");
                }
            }
        }
        cleaned
    }

    fn clean_entry(&self, entry: &Value) -> Result<CleanObjectEntry, &'static str> {
        let Some(map) = entry.as_object() else {
            return Err("not_an_object");
        };
        let Some(name) = map.get("name").and_then(Value::as_str) else {
            return Err("name_not_string");
        };
        let name = name.trim();
        self.policy.check(name).map_err(Rejection::as_str)?;

        let confidence = map
            .get("confidence")
            .and_then(Value::as_str)
            .and_then(Confidence::parse_label)
            .unwrap_or(self.default_confidence);

        Ok(CleanObjectEntry {
            name: name.to_string(),
            confidence,
        })
    }
}

/// Sanitize with the built-in policy and `low` as the default confidence.
#[must_use]
pub fn sanitize(entries: &[Value]) -> Vec<CleanObjectEntry> {
    ObjectSanitizer::default().sanitize(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(cleaned: &[CleanObjectEntry]) -> Vec<&str> {
        cleaned.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn keeps_valid_entries_in_order() {
        let cleaned = sanitize(&[
            json!({"name": "crane", "confidence": "high"}),
            json!({"name": "helmet", "confidence": "medium"}),
            json!({"name": "scaffolding", "confidence": "low"}),
        ]);
        assert_eq!(names(&cleaned), vec!["crane", "helmet", "scaffolding"]);
        assert_eq!(cleaned[0].confidence, Confidence::High);
        assert_eq!(cleaned[1].confidence, Confidence::Medium);
    }

    #[test]
    fn dedup_is_case_insensitive_first_wins() {
        let cleaned = sanitize(&[
            json!({"name": "Crane", "confidence": "low"}),
            json!({"name": "crane", "confidence": "high"}),
        ]);
        assert_eq!(
            cleaned,
            vec![CleanObjectEntry {
                name: "Crane".to_string(),
                confidence: Confidence::Low,
            }]
        );
    }

    #[test]
    fn unreadable_confidence_defaults_to_low() {
        let cleaned = sanitize(&[
            json!({"name": "a", "confidence": "maybe"}),
            json!({"name": "b", "confidence": 0.9}),
            json!({"name": "c"}),
            json!({"name": "d", "confidence": "  HIGH "}),
        ]);
        let labels: Vec<Confidence> = cleaned.iter().map(|entry| entry.confidence).collect();
        assert_eq!(
            labels,
            vec![
                Confidence::Low,
                Confidence::Low,
                Confidence::Low,
                Confidence::High
            ]
        );
    }

    #[test]
    fn configured_default_confidence_is_used() {
        let sanitizer = ObjectSanitizer::new(NamePolicy::builtin(), Confidence::Medium);
        let cleaned = sanitizer.sanitize(&[json!({"name": "a", "confidence": "maybe"})]);
        assert_eq!(cleaned[0].confidence, Confidence::Medium);
    }

    #[test]
    fn malformed_entries_are_dropped_individually() {
        let cleaned = sanitize(&[
            json!("crane"),
            json!(null),
            json!({"name": 5, "confidence": "high"}),
            json!({"name": "   ", "confidence": "high"}),
            json!({"label": "helmet"}),
            json!({"name": "  helmet  ", "confidence": "high"}),
        ]);
        assert_eq!(names(&cleaned), vec!["helmet"]);
    }

    #[test]
    fn policy_violations_are_dropped() {
        let cleaned = sanitize(&[
            json!({"name": "...", "confidence": "high"}),
            json!({"name": "xxx", "confidence": "high"}),
            json!({"name": "object", "confidence": "high"}),
            json!({"name": "konkrétní český název objektu", "confidence": "high"}),
            json!({"name": "pláž", "confidence": "high"}),
            json!({"name": "Scene", "confidence": "high"}),
            json!({"name": "bagr", "confidence": "medium"}),
        ]);
        assert_eq!(names(&cleaned), vec!["bagr"]);
    }

    #[test]
    fn sanitizing_clean_output_is_idempotent() {
        let first = sanitize(&[
            json!({"name": "Crane", "confidence": "HIGH"}),
            json!({"name": "crane", "confidence": "low"}),
            json!({"name": " helmet ", "confidence": "perhaps"}),
            json!({"name": "pláž", "confidence": "high"}),
        ]);
        let reencoded: Vec<Value> = first
            .iter()
            .map(|entry| serde_json::to_value(entry).unwrap())
            .collect();
        assert_eq!(sanitize(&reencoded), first);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(sanitize(&[]).is_empty());
    }
}
