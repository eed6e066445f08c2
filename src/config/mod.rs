pub mod remote;

use std::env;
use std::fmt;

pub use remote::{ApiConfig, ConfigLoadError, ConfigSource, ConfigState};

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    /// Unrecognized or missing values select development.
    fn detect(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::Development;
        };
        if raw.eq_ignore_ascii_case("production") || raw.eq_ignore_ascii_case("prod") {
            Self::Production
        } else if raw.eq_ignore_ascii_case("test") || raw.eq_ignore_ascii_case("ci") {
            Self::Test
        } else {
            Self::Development
        }
    }
}

/// Process-level settings read from the environment before anything else runs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub config_source: ConfigSource,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::detect(env::var("APP_ENV").ok().as_deref());

        let raw_source =
            env::var("APP_CONFIG_SOURCE").unwrap_or_else(|_| "config.json".to_string());
        let config_source = ConfigSource::parse(&raw_source)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            config_source,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyConfigSource,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyConfigSource => {
                write!(f, "APP_CONFIG_SOURCE must name a file path or an http(s) URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
