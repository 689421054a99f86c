use std::borrow::Cow;

use serde_json::Value;

use crate::config::RecoveryConfig;
use crate::error::RecoveryError;

use super::envelope::resolve_blob;
use super::fallback::{extract_fallback, FallbackLimits};
use super::model::{ParsedPayload, RecoveryPath, SanitizedResult};
use super::parser::recover_traced;
use super::policy::NamePolicy;
use super::sanitizer::ObjectSanitizer;

/// Turns any upstream output shape into a [`SanitizedResult`].
///
/// Holds only immutable settings; one assembler can serve every request.
#[derive(Debug, Clone)]
pub struct ResultAssembler {
    config: RecoveryConfig,
    policy: Cow<'static, NamePolicy>,
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new(RecoveryConfig::default())
    }
}

impl ResultAssembler {
    #[must_use]
    pub fn new(config: RecoveryConfig) -> Self {
        let policy = if config.extra_blacklist.is_empty() {
            Cow::Borrowed(NamePolicy::builtin())
        } else {
            Cow::Owned(NamePolicy::with_extra(&config.extra_blacklist))
        };
        Self { config, policy }
    }

    #[must_use]
    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Assemble a result from an envelope, a JSON string, or a payload that
    /// already carries an `objects` array.
    #[must_use]
    pub fn assemble(&self, input: &Value) -> SanitizedResult {
        if let Some(payload) = ParsedPayload::from_value_ref(input) {
            return self.finish_payload(payload, RecoveryPath::Structured, || input.clone());
        }
        self.assemble_blob(resolve_blob(input), || input.clone())
    }

    /// Assemble a result from raw generator text.
    #[must_use]
    pub fn assemble_text(&self, text: &str) -> SanitizedResult {
        let blob = (!text.trim().is_empty()).then_some(text);
        self.assemble_blob(blob, || Value::String(text.to_string()))
    }

    fn assemble_blob(&self, blob: Option<&str>, raw: impl FnOnce() -> Value) -> SanitizedResult {
        let Some(blob) = blob else {
            let err = RecoveryError::EmptyInput;
            tracing::warn!("{err}");
            return SanitizedResult::failure(&err, raw());
        };

        if let Some(recovered) = recover_traced(blob, self.config.max_unwrap_depth) {
            return self.finish_payload(
                recovered.payload,
                RecoveryPath::Parsed(recovered.strategy),
                raw,
            );
        }

        let objects = extract_fallback(blob, &self.policy, self.fallback_limits());
        tracing::info!(
            bytes = blob.len(),
            objects = objects.len(),
            "structured recovery failed, using plain-text fallback"
        );
        SanitizedResult::success(
            String::new(),
            objects,
            RecoveryPath::Fallback,
            self.success_raw(raw),
        )
    }

    fn finish_payload(
        &self,
        payload: ParsedPayload,
        path: RecoveryPath,
        raw: impl FnOnce() -> Value,
    ) -> SanitizedResult {
        let sanitizer = ObjectSanitizer::new(&self.policy, self.config.default_confidence);
        let objects = sanitizer.sanitize(&payload.objects);
        tracing::debug!(
            path = path.label(),
            raw_objects = payload.objects.len(),
            kept = objects.len(),
            "sanitized recovered objects"
        );
        SanitizedResult::success(payload.caption, objects, path, self.success_raw(raw))
    }

    fn success_raw(&self, raw: impl FnOnce() -> Value) -> Option<Value> {
        self.config.include_raw_on_success.then(raw)
    }

    fn fallback_limits(&self) -> FallbackLimits {
        FallbackLimits {
            max_objects: self.config.fallback_max_objects,
            max_fragment_chars: self.config.fallback_max_fragment_chars,
            confidence: self.config.fallback_confidence,
        }
    }
}

/// Assemble with default settings.
#[must_use]
pub fn assemble(input: &Value) -> SanitizedResult {
    ResultAssembler::default().assemble(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recovery::model::{CleanObjectEntry, Confidence};
    use serde_json::json;

    const PAYLOAD: &str = r#"{"caption":"c","objects":[{"name":"a","confidence":"high"}]}"#;

    fn single_a() -> Vec<CleanObjectEntry> {
        vec![CleanObjectEntry {
            name: "a".to_string(),
            confidence: Confidence::High,
        }]
    }

    #[test]
    fn structured_input_skips_parsing() {
        let input = json!({"caption": "c", "objects": [{"name": "a", "confidence": "high"}]});
        let result = assemble(&input);
        assert!(result.ok);
        assert_eq!(result.caption, "c");
        assert_eq!(result.objects, single_a());
        assert_eq!(result.path, RecoveryPath::Structured);
        assert!(result.raw.is_none());
    }

    #[test]
    fn envelope_text_is_parsed() {
        let result = assemble(&json!({"response": PAYLOAD}));
        assert!(result.ok);
        assert_eq!(result.caption, "c");
        assert_eq!(result.objects, single_a());
        assert_eq!(result.path, RecoveryPath::Parsed("direct"));
    }

    #[test]
    fn unparsable_text_falls_back() {
        let result = assemble(&json!({"output_text": "helmet, crane, pláž"}));
        assert!(result.ok);
        assert_eq!(result.caption, "");
        assert_eq!(result.path, RecoveryPath::Fallback);
        assert_eq!(result.objects.len(), 2);
        assert_eq!(result.objects[0].name, "helmet");
        assert_eq!(result.objects[1].name, "crane");
        for object in &result.objects {
            assert_eq!(object.confidence, Confidence::Low);
        }
    }

    #[test]
    fn empty_envelope_is_failure() {
        let input = json!({"status": "done"});
        let result = assemble(&input);
        assert!(!result.ok);
        assert!(result.objects.is_empty());
        assert_eq!(result.caption, "");
        assert_eq!(result.raw, Some(input));
        assert_eq!(result.path, RecoveryPath::Empty);
        assert!(result.error.is_some());
    }

    #[test]
    fn empty_text_is_failure() {
        let assembler = ResultAssembler::default();
        let result = assembler.assemble_text("");
        assert!(!result.ok);
        assert_eq!(result.raw, Some(json!("")));
    }

    #[test]
    fn raw_is_attached_on_success_when_configured() {
        let assembler = ResultAssembler::new(RecoveryConfig {
            include_raw_on_success: true,
            ..RecoveryConfig::default()
        });
        let result = assembler.assemble_text(PAYLOAD);
        assert_eq!(result.raw, Some(json!(PAYLOAD)));
    }

    #[test]
    fn extra_blacklist_applies_to_both_paths() {
        let assembler = ResultAssembler::new(RecoveryConfig {
            extra_blacklist: vec!["Crane".to_string()],
            ..RecoveryConfig::default()
        });
        let payload = r#"{"objects":[{"name":"crane"},{"name":"helmet"}]}"#;
        let parsed = assembler.assemble_text(payload);
        assert_eq!(parsed.objects.len(), 1);
        let fallback = assembler.assemble_text("crane, helmet");
        assert_eq!(fallback.objects.len(), 1);
        assert_eq!(fallback.objects[0].name, "helmet");
    }

    #[test]
    fn structured_objects_with_bad_entries_are_sanitized() {
        let input = json!({"objects": [
            {"name": "xxx", "confidence": "high"},
            {"name": "Crane", "confidence": "maybe"},
            {"name": "crane", "confidence": "high"}
        ]});
        let result = assemble(&input);
        assert_eq!(
            result.objects,
            vec![CleanObjectEntry {
                name: "Crane".to_string(),
                confidence: Confidence::Low,
            }]
        );
    }
}
