// Application state module
// Immutable runtime state shared across connections

use crate::logger::AccessLogFormat;

use super::types::Config;

/// Application state
///
/// Resolved once at startup from [`Config`] and shared behind an `Arc`;
/// request handling never takes a lock.
pub struct AppState {
    pub config: Config,
    pub access_log: bool,
    pub show_headers: bool,
    pub access_log_format: AccessLogFormat,
}

impl AppState {
    /// Create `AppState` from the loaded configuration.
    /// Debug mode forces per-request header logging on.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            access_log: config.logging.access_log,
            show_headers: config.logging.show_headers || config.server.debug,
            access_log_format: AccessLogFormat::parse(&config.logging.access_log_format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::load_from("nonexistent-config-for-tests").expect("defaults load")
    }

    #[test]
    fn test_state_mirrors_logging_config() {
        let config = test_config();
        let state = AppState::new(&config);

        assert!(state.access_log);
        assert!(!state.show_headers);
        assert_eq!(state.access_log_format, AccessLogFormat::Combined);
    }

    #[test]
    fn test_debug_mode_forces_header_logging() {
        let mut config = test_config();
        config.server.debug = true;
        config.logging.show_headers = false;

        let state = AppState::new(&config);
        assert!(state.show_headers);
    }
}
