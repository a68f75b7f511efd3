use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-call deadline applied when the config does not set one.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Client configuration.
///
/// Keys are snake_case; the camelCase names used by the other VaultX SDKs
/// (`apiBaseUrl`, `apiKey`, `timeoutMs`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the VaultX API, e.g. `https://api.vaultx.one`
    #[serde(alias = "apiBaseUrl")]
    pub api_base_url: String,

    /// Static bearer token, sent as `Authorization: Bearer <token>`
    #[serde(default, alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request deadline in milliseconds (must be > 0)
    #[serde(default = "default_timeout_ms", alias = "timeoutMs")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("apiBaseUrl is required")]
    MissingBaseUrl,

    #[error("apiBaseUrl is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("timeoutMs must be greater than zero")]
    ZeroTimeout,

    #[error("apiKey contains characters that cannot be sent in an HTTP header")]
    InvalidApiKey,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the config and return its normalized form.
    ///
    /// Trailing slashes are stripped from the base URL and an empty API key
    /// is treated as absent.
    pub fn normalized(self) -> Result<Self, ConfigError> {
        let base = self.api_base_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let parsed =
            url::Url::parse(base).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;

        // `host:port` parses with the host as scheme
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{} is not an http(s) base URL",
                base
            )));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            api_base_url: base.to_string(),
            api_key: self.api_key.filter(|key| !key.is_empty()),
            timeout_ms: self.timeout_ms,
        })
    }
}
