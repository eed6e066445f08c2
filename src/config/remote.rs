//! Runtime configuration document naming the scoring service.
//!
//! The document is read exactly once at startup. A failed read is logged and
//! leaves the client permanently unconfigured; there is no retry.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use super::ConfigError;

/// Where the runtime configuration document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Url(String),
    File(PathBuf),
}

impl ConfigSource {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyConfigSource);
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(trimmed.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Url(url) => f.write_str(url),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Immutable scoring-service settings, handed to every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{endpoint}` with exactly one separating slash.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(rename = "API_BASE_URL")]
    api_base_url: String,
}

/// Outcome of the one-shot configuration read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigState {
    #[default]
    Loading,
    Ready(ApiConfig),
    Failed,
}

impl ConfigState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ConfigState::Ready(_))
    }

    pub fn api(&self) -> Option<&ApiConfig> {
        match self {
            ConfigState::Ready(api) => Some(api),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to fetch configuration: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("configuration request returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),
    #[error("configuration document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads and parses the configuration document.
pub async fn fetch_api_config(
    client: &reqwest::Client,
    source: &ConfigSource,
) -> Result<ApiConfig, ConfigLoadError> {
    let body = match source {
        ConfigSource::Url(url) => {
            let response = client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(ConfigLoadError::Status(response.status()));
            }
            response.bytes().await?.to_vec()
        }
        ConfigSource::File(path) => tokio::fs::read(path).await?,
    };

    let document: ConfigDocument = serde_json::from_slice(&body)?;
    Ok(ApiConfig::new(document.api_base_url))
}

/// Startup entry point: never fails, records the outcome as a [`ConfigState`].
pub async fn load_api_config(client: &reqwest::Client, source: &ConfigSource) -> ConfigState {
    match fetch_api_config(client, source).await {
        Ok(api) => {
            info!(%source, base_url = api.base_url(), "runtime configuration loaded");
            ConfigState::Ready(api)
        }
        Err(err) => {
            error!(%source, error = %err, "config load error");
            ConfigState::Failed
        }
    }
}
