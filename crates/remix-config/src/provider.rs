use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Model used when the configuration does not name one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "API_KEY";

/// Configuration for the generative image provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: ProviderType,
    /// API key; an empty value counts as missing
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (tests point this at a mock)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::default(),
            api_key: None,
            base_url: None,
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ProviderConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Supported providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// Google Gemini `generateContent` with image output
    #[default]
    Gemini,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout() -> u64 {
    120
}
