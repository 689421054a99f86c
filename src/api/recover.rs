use std::time::Instant;

use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;

use crate::error::{http_status_for_result, RecoveryError};
use crate::observability::log_recovery_outcome;
use crate::recovery::SanitizedResult;
use crate::state::AppState;

/// `POST /v1/recover` handler.
///
/// The body is either JSON (an envelope, a JSON string, or a payload with
/// `objects`) or raw generator text. JSON scalars and arrays are treated as
/// text, since the generator occasionally answers with a bare number or list.
pub fn handler(state: &AppState, body: &[u8]) -> Response {
    let start_time = Instant::now();

    let Ok(text) = std::str::from_utf8(body) else {
        return RecoveryError::InvalidRequest("request body is not valid UTF-8".to_string())
            .into_response();
    };

    let result = recover_body(state, text);
    log_recovery_outcome(&result, start_time);
    (http_status_for_result(&result), Json(result)).into_response()
}

fn recover_body(state: &AppState, text: &str) -> SanitizedResult {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::String(_))) => state.assembler.assemble(&value),
        _ => state.assembler.assemble_text(text),
    }
}
