use remix_config::{API_KEY_ENV, Config, ProviderType};
use remix_core::{GenerationRequest, GenerationResponse};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::{ProxyError, Result},
    provider::{ImageProvider, gemini::GeminiProvider},
};

/// Backend proxy holding the provider and its credential
pub struct Proxy {
    provider: Box<dyn ImageProvider>,
    body_limit: usize,
}

impl Proxy {
    /// Create a proxy around an already-built provider
    pub fn new(provider: Box<dyn ImageProvider>, body_limit: usize) -> Self {
        Self { provider, body_limit }
    }

    /// Maximum accepted request body size in bytes
    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Validate the request, call the provider and wrap the image as a data URI
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let missing = request.missing_fields();

        if !missing.is_empty() {
            tracing::debug!(missing = ?missing, "rejecting generate request");
            return Err(ProxyError::InvalidRequest(format!(
                "missing parameters: {}; mimeType, base64ImageData and prompt are required",
                missing.join(", ")
            )));
        }

        let image = self.provider.generate(request).await?;

        Ok(GenerationResponse {
            image_url: Some(image.to_data_uri()),
        })
    }

    /// Name of the configured provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

/// Builder for constructing the proxy from configuration
pub struct ProxyBuilder<'a> {
    config: &'a Config,
}

impl<'a> ProxyBuilder<'a> {
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> anyhow::Result<Proxy> {
        let provider_config = &self.config.provider;
        let api_key = resolve_api_key(provider_config.api_key.as_ref());

        if api_key.is_none() {
            tracing::warn!("no provider API key configured, generate requests will fail with 500");
        }

        let provider: Box<dyn ImageProvider> = match provider_config.provider_type {
            ProviderType::Gemini => Box::new(
                GeminiProvider::new(
                    "gemini".to_owned(),
                    api_key,
                    provider_config.base_url.as_ref(),
                    provider_config.model.clone(),
                    provider_config.timeout(),
                )
                .map_err(|e| anyhow::anyhow!("failed to build Gemini HTTP client: {e}"))?,
            ),
        };

        tracing::debug!(
            provider = %provider.name(),
            model = %provider_config.model,
            "image provider initialized"
        );

        Ok(Proxy::new(provider, self.config.server.body_limit))
    }
}

/// Configured key if non-empty, else the `API_KEY` environment variable
fn resolve_api_key(configured: Option<&SecretString>) -> Option<SecretString> {
    configured
        .filter(|key| !key.expose_secret().is_empty())
        .cloned()
        .or_else(|| {
            std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty())
                .map(SecretString::from)
        })
}
