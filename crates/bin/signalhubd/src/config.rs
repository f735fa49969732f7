//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `signalhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use signalhub_adapter_dispatch_http::DispatchConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Sequence engine settings.
    pub engine: EngineConfig,
    /// Device transport and dispatch pool settings.
    pub dispatch: DispatchConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Connection pool size.
    pub max_connections: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Sequence engine configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scan period in milliseconds.
    pub tick_ms: u64,
}

impl Config {
    /// Load configuration from `signalhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("signalhub.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SIGNALHUB_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("SIGNALHUB_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = var("SIGNALHUB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("SIGNALHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("SIGNALHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SIGNALHUB_TICK_MS")
            && let Ok(tick_ms) = val.parse()
        {
            self.engine.tick_ms = tick_ms;
        }
        if let Some(val) = var("SIGNALHUB_DEVICE_PORT")
            && let Ok(port) = val.parse()
        {
            self.dispatch.device_port = port;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.engine.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "engine tick must be non-zero".to_string(),
            ));
        }
        if self.dispatch.device_port == 0 {
            return Err(ConfigError::Validation(
                "device port must be non-zero".to_string(),
            ));
        }
        if self.dispatch.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "dispatch timeout must be non-zero".to_string(),
            ));
        }
        if self.dispatch.workers == 0 {
            return Err(ConfigError::Validation(
                "dispatch workers must be non-zero".to_string(),
            ));
        }
        if self.dispatch.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "dispatch queue capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Return the sequence engine scan period.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.engine.tick_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:signalhub.db?mode=rwc".to_string(),
            max_connections: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "signalhubd=info,signalhub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.database.url, "sqlite:signalhub.db?mode=rwc");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.tick(), Duration::from_millis(100));
        assert_eq!(config.dispatch.device_port, 5000);
        assert_eq!(config.dispatch.timeout_ms, 500);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'
            max_connections = 2

            [logging]
            filter = 'debug'

            [engine]
            tick_ms = 50

            [dispatch]
            device_port = 8000
            timeout_ms = 250
            workers = 4
            queue_capacity = 32
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.engine.tick_ms, 50);
        assert_eq!(config.dispatch.device_port, 8000);
        assert_eq!(config.dispatch.timeout_ms, 250);
        assert_eq!(config.dispatch.workers, 4);
        assert_eq!(config.dispatch.queue_capacity, 32);
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [dispatch]
            device_port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.dispatch.device_port, 8080);
        assert_eq!(config.dispatch.workers, 8);
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.engine.tick_ms, 100);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("SIGNALHUB_PORT", "7000"),
            ("SIGNALHUB_DATABASE_URL", "sqlite::memory:"),
            ("SIGNALHUB_TICK_MS", "20"),
            ("SIGNALHUB_DEVICE_PORT", "5050"),
        ]));
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.engine.tick_ms, 20);
        assert_eq!(config.dispatch.device_port, 5050);
    }

    #[test]
    fn should_split_bind_override_into_host_and_port() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("SIGNALHUB_BIND", "127.0.0.1:8081")]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn should_prefer_rust_log_over_signalhub_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("SIGNALHUB_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_numeric_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("SIGNALHUB_PORT", "http")]));
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_tick() {
        let mut config = Config::default();
        config.engine.tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_dispatch_pool() {
        let mut config = Config::default();
        config.dispatch.workers = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.dispatch.queue_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.dispatch.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5001");
    }
}
