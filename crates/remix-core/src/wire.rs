//! JSON wire format of `POST /api/generate`

use serde::{Deserialize, Serialize};

use crate::ImageResource;

/// Request body sent by the generation client to the backend proxy
///
/// Fields default to empty strings so the proxy can report every missing
/// parameter with a 400 instead of a deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub base64_image_data: String,
    #[serde(default)]
    pub prompt: String,
}

impl GenerationRequest {
    /// Build the wire payload for an image and a prompt
    pub fn new(resource: &ImageResource, prompt: impl Into<String>) -> Self {
        Self {
            mime_type: resource.mime_type().to_owned(),
            base64_image_data: resource.base64_payload(),
            prompt: prompt.into(),
        }
    }

    /// Names of the required fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("mimeType", &self.mime_type),
            ("base64ImageData", &self.base64_image_data),
            ("prompt", &self.prompt),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Successful proxy response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    /// `data:` URI of the generated image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Error body returned by the proxy for every failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
