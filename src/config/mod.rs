// Configuration module
// Layered loading (defaults < file < environment) and derived runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::Config;

impl Config {
    /// Load configuration, layering the optional file at `config_path`
    /// (extension-less name, "config" by default) and the environment over
    /// the built-in defaults. The defaults reproduce the deployed service:
    /// bind-all on port 5000, debug off.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            // FACTORIAL__SERVER__PORT=8080 overrides server.port
            .add_source(
                config::Environment::with_prefix("FACTORIAL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.debug", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_config_file() {
        let config = Config::load_from("nonexistent-config-for-tests").expect("defaults load");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert!(!config.server.debug);
        assert!(config.server.workers.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.performance.keep_alive_timeout, 75);
        assert!(config.performance.max_connections.is_none());
        assert!(!config.http.enable_cors);
        assert_eq!(config.http.max_body_size, 10_485_760);
    }

    #[test]
    fn test_socket_addr_from_defaults() {
        let config = Config::load_from("nonexistent-config-for-tests").expect("defaults load");
        let addr = config.get_socket_addr().expect("valid address");

        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_unspecified());
    }
}
