use std::sync::Arc;

use axum::body::Body;
use axum::extract::FromRequest;
use remix_core::GenerationRequest;

use crate::{error::ProxyError, server::Proxy};

/// Extractor for the generate payload
///
/// Replaces axum's `Json` so every rejection is rendered as `{ "error": ... }`
/// with the status the proxy contract asks for.
pub struct ExtractGeneration(pub GenerationRequest);

impl FromRequest<Arc<Proxy>> for ExtractGeneration {
    type Rejection = ProxyError;

    async fn from_request(request: http::Request<Body>, proxy: &Arc<Proxy>) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let is_json = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim_start().starts_with("application/json"));

        if !is_json {
            return Err(ProxyError::InvalidRequest(
                "expected a JSON body with mimeType, base64ImageData and prompt".to_owned(),
            ));
        }

        let limit = proxy.body_limit();

        let bytes = axum::body::to_bytes(body, limit).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                ProxyError::PayloadTooLarge(limit)
            } else {
                ProxyError::InvalidRequest(format!("failed to read request body: {err}"))
            }
        })?;

        let request = serde_json::from_slice::<GenerationRequest>(&bytes)
            .map_err(|e| ProxyError::InvalidRequest(format!("failed to parse request body: {e}")))?;

        Ok(Self(request))
    }
}
