#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
mod loader;
pub mod provider;
pub mod server;
pub mod studio;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use provider::*;
pub use server::*;
pub use studio::*;
pub use telemetry::*;

/// Top-level Remix configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration for the backend proxy
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative image provider used by the proxy
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Interactive studio (controller) configuration
    #[serde(default)]
    pub studio: StudioConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
