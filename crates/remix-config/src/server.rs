use std::net::SocketAddr;

use serde::Deserialize;

use crate::cors::CorsConfig;

/// Default listen address when none is configured
pub const DEFAULT_LISTEN_ADDRESS: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);

/// Route of the liveness check unless configured otherwise
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Request bodies carry a base64 image, so the limit sits well above axum's 2 MiB default
const DEFAULT_BODY_LIMIT_BYTES: usize = 20 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            health: HealthConfig::default(),
            cors: None,
            body_limit: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ServerConfig {
    /// Configured listen address or `0.0.0.0:3000`
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_LISTEN_ADDRESS))
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}

/// Liveness route answered with a plain `ok`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HEALTH_PATH.to_owned(),
        }
    }
}
