use std::path::PathBuf;
use std::sync::Arc;

use remix_core::ImageResource;

use crate::backend::StudioBackend;
use crate::message::Message;
use crate::state::{Preview, RequestToken};

/// Side effect requested by a transition
#[derive(Debug, Clone)]
pub enum Effect {
    LoadFile {
        token: RequestToken,
        path: PathBuf,
    },
    FetchUrl {
        token: RequestToken,
        url: String,
    },
    Generate {
        token: RequestToken,
        resource: Arc<ImageResource>,
        prompt: String,
    },
}

impl Effect {
    pub const fn token(&self) -> RequestToken {
        match self {
            Self::LoadFile { token, .. } | Self::FetchUrl { token, .. } | Self::Generate { token, .. } => *token,
        }
    }

    /// Run against `backend` and describe the outcome as a message
    ///
    /// Failures become their user-facing text here.
    pub async fn execute(self, backend: &dyn StudioBackend) -> Message {
        match self {
            Self::LoadFile { token, path } => {
                let result = backend.load_file(&path).await.map_err(|e| e.to_string());

                Message::ImageLoaded {
                    token,
                    preview: Preview::File(path),
                    result,
                }
            }
            Self::FetchUrl { token, url } => {
                let result = backend.fetch_url(&url).await.map_err(|e| e.to_string());

                Message::ImageLoaded {
                    token,
                    preview: Preview::Url(url),
                    result,
                }
            }
            Self::Generate {
                token,
                resource,
                prompt,
            } => {
                let result = backend.generate(&resource, &prompt).await.map_err(|e| e.to_string());

                Message::Generated { token, result }
            }
        }
    }
}
