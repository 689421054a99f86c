use crate::recovery::SanitizedResult;

/// Canonical error type used across all modules.
///
/// The recovery core never returns these to its caller; they only shape the
/// `error` field of a failed [`SanitizedResult`] and the HTTP status chosen
/// for it.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("Empty input: upstream produced no usable text")]
    EmptyInput,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Request body too large (max {limit} bytes)")]
    PayloadTooLarge { limit: usize },
}

/// Broad error category for status code selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidRequest,
    PayloadTooLarge,
    Upstream,
}

impl RecoveryError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecoveryError::InvalidRequest(_) => ErrorCategory::InvalidRequest,
            RecoveryError::PayloadTooLarge { .. } => ErrorCategory::PayloadTooLarge,
            RecoveryError::EmptyInput => ErrorCategory::Upstream,
        }
    }
}

// ---------------------------------------------------------------------------
// Category -> HTTP status code
// ---------------------------------------------------------------------------

#[must_use]
pub fn http_status_for_category(cat: ErrorCategory) -> http::StatusCode {
    match cat {
        ErrorCategory::InvalidRequest => http::StatusCode::BAD_REQUEST,
        ErrorCategory::PayloadTooLarge => http::StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCategory::Upstream => http::StatusCode::BAD_GATEWAY,
    }
}

/// Status code for a finished recovery result.
#[must_use]
pub fn http_status_for_result(result: &SanitizedResult) -> http::StatusCode {
    if result.ok {
        http::StatusCode::OK
    } else {
        http_status_for_category(ErrorCategory::Upstream)
    }
}

// ---------------------------------------------------------------------------
// Axum integration
// ---------------------------------------------------------------------------

/// Errors outside the recovery core are rendered in the same wire shape as a
/// failed result so clients only ever parse one body format.
impl axum::response::IntoResponse for RecoveryError {
    fn into_response(self) -> axum::response::Response {
        let status = http_status_for_category(self.category());
        let body = serde_json::json!({
            "ok": false,
            "caption": "",
            "objects": [],
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
