use super::{AppConfig, ConfigError};

const MAX_FALLBACK_OBJECTS: usize = 100;
const MAX_UNWRAP_DEPTH: usize = 16;

/// Validate the full application config, returning an error if any rule is violated.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when any configuration invariant is violated.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_server_config(config)?;
    validate_recovery_config(config)?;
    validate_log_level(config)?;
    Ok(())
}

fn validation_err(msg: impl Into<String>) -> ConfigError {
    ConfigError::Validation(msg.into())
}

fn validate_server_config(config: &AppConfig) -> Result<(), ConfigError> {
    let server = &config.server;
    if server.max_body_bytes == 0 {
        return Err(validation_err(
            "server.max_body_bytes must be greater than 0",
        ));
    }
    if let Some(worker_threads) = server.runtime_worker_threads {
        if worker_threads == 0 {
            return Err(validation_err(
                "server.runtime_worker_threads must be greater than 0 when set",
            ));
        }
    }
    Ok(())
}

fn validate_recovery_config(config: &AppConfig) -> Result<(), ConfigError> {
    let recovery = &config.recovery;
    if recovery.fallback_max_objects == 0 || recovery.fallback_max_objects > MAX_FALLBACK_OBJECTS {
        return Err(validation_err(format!(
            "recovery.fallback_max_objects must be between 1 and {MAX_FALLBACK_OBJECTS}"
        )));
    }
    if recovery.fallback_max_fragment_chars == 0 {
        return Err(validation_err(
            "recovery.fallback_max_fragment_chars must be greater than 0",
        ));
    }
    if recovery.max_unwrap_depth == 0 || recovery.max_unwrap_depth > MAX_UNWRAP_DEPTH {
        return Err(validation_err(format!(
            "recovery.max_unwrap_depth must be between 1 and {MAX_UNWRAP_DEPTH}"
        )));
    }
    for term in &recovery.extra_blacklist {
        if term.trim().is_empty() {
            return Err(validation_err(
                "recovery.extra_blacklist contains an empty entry",
            ));
        }
    }
    Ok(())
}

fn validate_log_level(config: &AppConfig) -> Result<(), ConfigError> {
    let valid_levels = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL", "DISABLED"];
    if !valid_levels.contains(&config.features.log_level.to_uppercase().as_str()) {
        return Err(validation_err(format!(
            "log_level must be one of {valid_levels:?}"
        )));
    }
    Ok(())
}
