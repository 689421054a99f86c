use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::recovery::SanitizedResult;

/// Initialize the tracing subscriber with the configured log level.
///
/// Maps config log levels to tracing levels:
/// - "DISABLED" -> no subscriber installed
/// - "WARNING" -> WARN
/// - "CRITICAL" -> ERROR
/// - Others map directly (DEBUG, INFO, ERROR)
pub fn init_tracing(log_level: &str) {
    let level = log_level.to_uppercase();

    if level == "DISABLED" {
        return;
    }

    let directive = tracing_level(&level);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("INFO"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn tracing_level(level: &str) -> &str {
    match level {
        "WARNING" => "WARN",
        "CRITICAL" => "ERROR",
        other => other,
    }
}

/// Log one summary line for a finished recovery request.
pub fn log_recovery_outcome(result: &SanitizedResult, start_time: Instant) {
    info!(
        ok = result.ok,
        path = result.path.label(),
        objects = result.objects.len(),
        caption = !result.caption.is_empty(),
        elapsed_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX),
        "recovery complete"
    );
}
