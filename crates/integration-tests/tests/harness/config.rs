//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use remix_config::{Config, CorsConfig, HealthConfig, ProviderConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point the Gemini provider at a mock with a test key
    pub fn with_gemini_provider(mut self, base_url: &str) -> Self {
        self.config.provider = ProviderConfig {
            api_key: Some(SecretString::from("test-key")),
            base_url: Some(base_url.parse().expect("valid URL")),
            model: "gemini-test".to_owned(),
            ..ProviderConfig::default()
        };
        self
    }

    /// Drop the provider key
    pub fn without_api_key(mut self) -> Self {
        self.config.provider.api_key = None;
        self
    }

    /// Set the provider request timeout
    pub fn with_provider_timeout(mut self, secs: u64) -> Self {
        self.config.provider.timeout_secs = secs;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Set the request body limit
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.config.server.body_limit = bytes;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
