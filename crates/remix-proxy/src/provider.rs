pub(crate) mod gemini;

use async_trait::async_trait;
use remix_core::{GenerationRequest, data_uri};

use crate::error::Result;

/// Image produced by a provider, still base64-encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64_data: String,
}

impl GeneratedImage {
    /// Render as `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        data_uri(&self.mime_type, &self.base64_data)
    }
}

/// A generative image backend able to produce a variation of an input image
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate a variation of the request's image following its prompt
    ///
    /// The request has already been validated by the proxy.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage>;

    /// Provider name used in logs
    fn name(&self) -> &str;
}
