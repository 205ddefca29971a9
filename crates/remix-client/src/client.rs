use std::fmt;
#[cfg(feature = "embedded")]
use std::sync::Arc;

use remix_core::{GenerationRequest, GenerationResponse, ImageResource};
use url::Url;

use crate::error::{ClientError, Result};

/// Path of the proxy's generate route
const GENERATE_PATH: &str = "/api/generate";

/// Backend mode for the generation client
#[derive(Clone)]
enum Backend {
    /// HTTP client talking to a remote proxy
    Remote { endpoint: Url, http: reqwest::Client },
    /// In-process proxy (requires `embedded` feature)
    #[cfg(feature = "embedded")]
    Embedded { proxy: Arc<remix_proxy::Proxy> },
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { endpoint, .. } => f
                .debug_struct("Remote")
                .field("endpoint", endpoint)
                .finish_non_exhaustive(),
            #[cfg(feature = "embedded")]
            Self::Embedded { .. } => f.debug_struct("Embedded").finish_non_exhaustive(),
        }
    }
}

/// Sends an image and a prompt to the proxy and returns the generated image
#[derive(Debug, Clone)]
pub struct GenerationClient {
    backend: Backend,
}

impl GenerationClient {
    /// Create a client for the proxy at `endpoint`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ClientError::Config(format!("invalid endpoint URL: {e}")))?;

        Ok(Self::from_url(endpoint))
    }

    pub fn from_url(endpoint: Url) -> Self {
        Self {
            backend: Backend::Remote {
                endpoint,
                http: reqwest::Client::new(),
            },
        }
    }

    /// Run generations in-process against `proxy` instead of over HTTP
    #[cfg(feature = "embedded")]
    pub const fn embedded(proxy: Arc<remix_proxy::Proxy>) -> Self {
        Self {
            backend: Backend::Embedded { proxy },
        }
    }

    /// Request a variation of `resource` guided by `prompt`
    ///
    /// Returns the `data:` URI of the generated image exactly as the proxy
    /// sent it.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] when the prompt is blank or no image is
    ///   given; nothing is sent in that case
    /// - [`ClientError::Unreachable`] when the proxy cannot be reached
    /// - [`ClientError::Generation`] when the proxy reports a failure or
    ///   returns no image
    pub async fn generate(&self, resource: Option<&ImageResource>, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(ClientError::Validation("a prompt is required".to_owned()));
        }

        let resource = resource.ok_or_else(|| ClientError::Validation("an image is required".to_owned()))?;

        let request = GenerationRequest::new(resource, prompt);

        let response = match &self.backend {
            Backend::Remote { endpoint, http } => send_remote(http, endpoint, &request).await?,
            #[cfg(feature = "embedded")]
            Backend::Embedded { proxy } => proxy.generate(&request).await.map_err(|e| {
                tracing::warn!(error = %e, "embedded generation failed");
                ClientError::Generation(e.client_message())
            })?,
        };

        response
            .image_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::Generation("no valid image URL returned".to_owned()))
    }
}

async fn send_remote(http: &reqwest::Client, endpoint: &Url, request: &GenerationRequest) -> Result<GenerationResponse> {
    let url = make_url(endpoint, GENERATE_PATH);

    tracing::debug!(%url, mime_type = %request.mime_type, "sending generation request");

    let response = http
        .post(url.as_str())
        .json(request)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "generation server unreachable");
            ClientError::Unreachable(e)
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = parse_error_body(&body).unwrap_or_else(|| format!("server error: status {}", status.as_u16()));

        tracing::warn!(%status, error = %message, "generation request failed");

        return Err(ClientError::Generation(message));
    }

    response
        .json::<GenerationResponse>()
        .await
        .map_err(|e| ClientError::Generation(format!("invalid response from server: {e}")))
}

/// Build a URL from a base and path
fn make_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url
}

/// Extract the `error` field of a proxy error body
///
/// Accepts both `{"error": "msg"}` and `{"error": {"message": "msg"}}`
fn parse_error_body(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let error = &json["error"];

    error
        .as_str()
        .or_else(|| error["message"].as_str())
        .filter(|message| !message.trim().is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn sample_image() -> ImageResource {
        ImageResource::new("cat.png", "image/png", &b"\x89PNG\r\n\x1a\n"[..]).unwrap()
    }

    #[test]
    fn error_body_accepts_string_and_object() {
        assert_eq!(parse_error_body(r#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(parse_error_body(r#"{"error":{"message":"worse"}}"#).as_deref(), Some("worse"));
        assert_eq!(parse_error_body(r#"{"error":""}"#), None);
        assert_eq!(parse_error_body("<html>"), None);
    }

    #[test]
    fn generate_path_replaces_endpoint_path() {
        let base = Url::parse("http://localhost:3000/studio").unwrap();
        assert_eq!(make_url(&base, GENERATE_PATH).as_str(), "http://localhost:3000/api/generate");
    }

    #[tokio::test]
    async fn blank_prompt_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GenerationClient::new(&server.uri()).unwrap();
        let err = client.generate(Some(&sample_image()), "   ").await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_image_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GenerationClient::new(&server.uri()).unwrap();
        let err = client.generate(None, "make it blue").await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn posts_wire_payload_and_returns_image_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "mimeType": "image/png",
                "base64ImageData": "iVBORw0KGgo=",
                "prompt": "make it blue",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "imageUrl": "data:image/png;base64,AAAA",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GenerationClient::new(&server.uri()).unwrap();
        let url = client.generate(Some(&sample_image()), "make it blue").await.unwrap();

        assert_eq!(url, "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "the API key is not configured on the server" })),
            )
            .mount(&server)
            .await;

        let client = GenerationClient::new(&server.uri()).unwrap();
        let err = client.generate(Some(&sample_image()), "p").await.unwrap_err();

        assert!(matches!(err, ClientError::Generation(ref m) if m == "the API key is not configured on the server"));
    }

    #[tokio::test]
    async fn status_is_reported_when_error_body_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = GenerationClient::new(&server.uri()).unwrap();
        let err = client.generate(Some(&sample_image()), "p").await.unwrap_err();

        assert_eq!(err.to_string(), "server error: status 503");
    }

    #[tokio::test]
    async fn success_without_image_url_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = GenerationClient::new(&server.uri()).unwrap();
        let err = client.generate(Some(&sample_image()), "p").await.unwrap_err();

        assert_eq!(err.to_string(), "no valid image URL returned");
    }

    #[tokio::test]
    async fn unreachable_proxy_names_the_server() {
        let client = GenerationClient::new("http://127.0.0.1:1").unwrap();
        let err = client.generate(Some(&sample_image()), "p").await.unwrap_err();

        assert!(matches!(err, ClientError::Unreachable(_)));
        assert!(err.to_string().starts_with("could not reach the generation server"));
        assert!(!err.to_string().contains("URL"));
    }

    #[test]
    fn invalid_endpoint_is_config_error() {
        let err = GenerationClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[cfg(feature = "embedded")]
    mod embedded {
        use std::sync::Arc;

        use remix_core::GenerationRequest;
        use remix_proxy::{GeneratedImage, ImageProvider, Proxy, ProxyError};

        use super::*;

        struct FixedProvider(Option<GeneratedImage>);

        #[async_trait::async_trait]
        impl ImageProvider for FixedProvider {
            async fn generate(&self, _request: &GenerationRequest) -> remix_proxy::Result<GeneratedImage> {
                self.0.clone().ok_or(ProxyError::NoImage)
            }

            fn name(&self) -> &str {
                "fixed"
            }
        }

        #[tokio::test]
        async fn embedded_returns_data_uri() {
            let image = GeneratedImage {
                mime_type: "image/png".to_owned(),
                base64_data: "AAAA".to_owned(),
            };
            let proxy = Arc::new(Proxy::new(Box::new(FixedProvider(Some(image))), 1024));

            let url = GenerationClient::embedded(proxy)
                .generate(Some(&sample_image()), "p")
                .await
                .unwrap();

            assert_eq!(url, "data:image/png;base64,AAAA");
        }

        #[tokio::test]
        async fn embedded_maps_proxy_errors() {
            let proxy = Arc::new(Proxy::new(Box::new(FixedProvider(None)), 1024));

            let err = GenerationClient::embedded(proxy)
                .generate(Some(&sample_image()), "p")
                .await
                .unwrap_err();

            assert_eq!(err.to_string(), "failed to generate image: the provider returned no image");
        }
    }
}
