#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Backend proxy for image variations
//!
//! Accepts `POST /api/generate` with an encoded image and a prompt, calls the
//! generative provider with the server-held key and answers with a data URI

mod error;
pub mod provider;
mod request;
mod server;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use remix_core::GenerationResponse;

pub use error::{ProxyError, Result};
pub use provider::{GeneratedImage, ImageProvider};
pub use server::{Proxy, ProxyBuilder};

use request::ExtractGeneration;

/// Route served by the proxy
pub const GENERATE_PATH: &str = "/api/generate";

/// Build the proxy from configuration
///
/// # Errors
///
/// Returns an error if the provider fails to initialize
pub fn build_proxy(config: &remix_config::Config) -> anyhow::Result<Arc<Proxy>> {
    let proxy = Arc::new(
        ProxyBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to initialize image proxy: {e}"))?,
    );

    tracing::info!(provider = %proxy.provider_name(), "image proxy ready");

    Ok(proxy)
}

/// Create the endpoint router for the proxy
pub fn endpoint_router() -> Router<Arc<Proxy>> {
    Router::new().route(GENERATE_PATH, post(generate).fallback(method_not_allowed))
}

/// Handle image variation requests
async fn generate(
    State(proxy): State<Arc<Proxy>>,
    ExtractGeneration(request): ExtractGeneration,
) -> Result<Json<GenerationResponse>> {
    tracing::debug!(
        mime_type = %request.mime_type,
        payload_len = request.base64_image_data.len(),
        "generate handler called"
    );

    let response = proxy.generate(&request).await.inspect_err(|e| {
        tracing::error!(status = %e.status_code(), error = %e, "generate request failed");
    })?;

    tracing::debug!("generate request complete");

    Ok(Json(response))
}

async fn method_not_allowed(method: http::Method) -> ProxyError {
    tracing::debug!(%method, "rejecting non-POST request");
    ProxyError::MethodNotAllowed
}
