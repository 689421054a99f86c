use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check handler.
/// Returns JSON with status and the active recovery settings.
pub fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let recovery = state.assembler.config();
    Json(json!({
        "status": "vision-tags is running",
        "config": {
            "log_level": state.config.features.log_level,
            "recovery": {
                "max_unwrap_depth": recovery.max_unwrap_depth,
                "fallback_max_objects": recovery.fallback_max_objects,
                "fallback_max_fragment_chars": recovery.fallback_max_fragment_chars,
                "default_confidence": recovery.default_confidence,
                "fallback_confidence": recovery.fallback_confidence,
                "include_raw_on_success": recovery.include_raw_on_success,
                "extra_blacklist_count": recovery.extra_blacklist.len(),
            }
        }
    }))
}
