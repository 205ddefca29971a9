use remix_core::{FormatError, ImageResource, encode};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{ClientError, Result};

/// Name given to fetched images whose URL has no usable last segment
const FALLBACK_NAME: &str = "image-from-url";

/// Downloads images from URLs
#[derive(Debug, Clone, Default)]
pub struct RemoteFetcher {
    http: reqwest::Client,
}

impl RemoteFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET `url` and wrap the body as an [`ImageResource`]
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] for URLs that are not http(s)
    /// - [`ClientError::Network`] when no response arrives
    /// - [`ClientError::HttpStatus`] for non-success statuses
    /// - [`ClientError::Blocked`] when the host answered with something that
    ///   is not an image
    pub async fn fetch_as_resource(&self, url: &str) -> Result<ImageResource> {
        let url = Url::parse(url.trim())
            .map_err(|e| ClientError::Validation(format!("invalid image URL: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Validation(format!(
                "invalid image URL: unsupported scheme '{}'",
                url.scheme()
            )));
        }

        tracing::debug!(%url, "fetching remote image");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "remote image request failed");
            ClientError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "remote image returned error status");
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.bytes().await.map_err(ClientError::Network)?;

        let name = resource_name(&url);

        encode(name, body, content_type.as_deref()).map_err(|e| match e {
            FormatError::UnknownType(_) => {
                tracing::warn!(%url, content_type = ?content_type, "remote response is not an image");
                ClientError::Blocked
            }
            other => ClientError::Format(other),
        })
    }
}

/// Last non-empty path segment, or a generic name
fn resource_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map_or_else(|| FALLBACK_NAME.to_owned(), str::to_owned)
}
