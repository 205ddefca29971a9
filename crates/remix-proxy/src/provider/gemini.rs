use std::time::Duration;

use async_trait::async_trait;
use remix_core::GenerationRequest;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{GeneratedImage, ImageProvider};
use crate::error::{ProxyError, Result};

/// Default Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Header carrying the API key, keeping it out of request URLs and access logs
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini image generation provider
pub(crate) struct GeminiProvider {
    name: String,
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// A missing key is accepted here and reported on every request instead.
    pub fn new(
        name: String,
        api_key: Option<SecretString>,
        base_url: Option<&Url>,
        model: String,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let base_url = base_url.map_or_else(|| DEFAULT_BASE_URL.to_string(), Url::to_string);

        Ok(Self {
            name,
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// -- Request wire types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    InlineData(RequestInlineData<'a>),
    Text(&'a str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestInlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl<'a> GeminiRequest<'a> {
    fn image_variation(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData(RequestInlineData {
                        mime_type: &request.mime_type,
                        data: &request.base64_image_data,
                    }),
                    RequestPart::Text(&request.prompt),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        }
    }
}

// -- Response wire types --

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

/// One fragment of a candidate's content
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPart")]
enum Part {
    Text(String),
    InlineData(InlineData),
    /// Kinds this proxy does not use (function calls, thoughts, ...)
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Parts arrive as objects keyed by kind, sometimes with sibling metadata
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

impl From<RawPart> for Part {
    fn from(raw: RawPart) -> Self {
        match (raw.inline_data, raw.text) {
            (Some(inline), _) => Self::InlineData(inline),
            (None, Some(text)) => Self::Text(text),
            (None, None) => Self::Other,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// First inline-data part of the first candidate
fn extract_image(response: GeminiResponse) -> Option<GeneratedImage> {
    let candidate = response.candidates.into_iter().next()?;

    if let Some(ref reason) = candidate.finish_reason {
        tracing::debug!(finish_reason = %reason, "candidate finished");
    }

    candidate
        .content?
        .parts
        .into_iter()
        .find_map(|part| match part {
            Part::InlineData(inline) if !inline.data.is_empty() => Some(GeneratedImage {
                mime_type: inline.mime_type,
                base64_data: inline.data,
            }),
            Part::Text(text) => {
                tracing::debug!(text_len = text.len(), "skipping text part");
                None
            }
            Part::InlineData(_) | Part::Other => None,
        })
}

/// Best-effort message from a provider error body
fn provider_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "provider error: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            )
        })
}

#[async_trait]
impl ImageProvider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| {
                tracing::error!(provider = %self.name, "no API key configured");
                ProxyError::MissingCredential
            })?;

        tracing::debug!(
            provider = %self.name,
            model = %self.model,
            mime_type = %request.mime_type,
            "sending image generation request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&GeminiRequest::image_variation(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "image generation request failed");
                ProxyError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_error_message(status, &body);

            tracing::error!(
                provider = %self.name,
                status = %status,
                message = %message,
                "provider API error"
            );

            return Err(ProxyError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let wire_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse provider response");
            ProxyError::Internal(Some("the provider response had an unexpected format".to_owned()))
        })?;

        let image = extract_image(wire_response).ok_or_else(|| {
            tracing::warn!(provider = %self.name, "provider response contained no inline image");
            ProxyError::NoImage
        })?;

        tracing::debug!(provider = %self.name, mime_type = %image.mime_type, "image generation complete");

        Ok(image)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
