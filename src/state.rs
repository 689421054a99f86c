use crate::config::AppConfig;
use crate::recovery::ResultAssembler;

/// Shared application state accessible to all handlers.
///
/// Everything here is read-only after startup.
pub struct AppState {
    pub config: AppConfig,
    pub assembler: ResultAssembler,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let assembler = ResultAssembler::new(config.recovery.clone());
        Self { config, assembler }
    }
}
