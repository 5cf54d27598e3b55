// Configuration types
// Deserialization targets for the layered configuration loader

use serde::Deserialize;

/// Top-level configuration, one struct per `config.toml` section.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// `[server]`: where the service listens and how the runtime is sized.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Raises diagnostic logging; never changes response behavior.
    pub debug: bool,
    /// Tokio worker threads; `None` leaves the runtime at its default.
    pub workers: Option<usize>,
}

/// `[logging]`: access/error log destinations and the access-log format.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// One of `combined`, `common`, `json`.
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log destination; stdout when unset.
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log destination; stderr when unset.
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// `[performance]`: connection lifecycle knobs, all in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    /// Admission cap on concurrent connections; `None` means unlimited.
    pub max_connections: Option<u64>,
}

/// `[http]`: request-level policy.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub max_body_size: u64,
}
