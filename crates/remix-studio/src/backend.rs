use std::path::Path;

use async_trait::async_trait;
use remix_client::{ClientError, GenerationClient, RemoteFetcher};
use remix_core::ImageResource;

/// I/O the studio performs on behalf of its commands
#[async_trait]
pub trait StudioBackend: Send + Sync + 'static {
    /// Read and encode a local image file
    async fn load_file(&self, path: &Path) -> remix_client::Result<ImageResource>;

    /// Download an image by URL
    async fn fetch_url(&self, url: &str) -> remix_client::Result<ImageResource>;

    /// Request a variation and return its data URI
    async fn generate(&self, resource: &ImageResource, prompt: &str) -> remix_client::Result<String>;
}

/// Backend wired to the real fetcher and generation client
#[derive(Debug, Clone)]
pub struct ClientBackend {
    fetcher: RemoteFetcher,
    client: GenerationClient,
}

impl ClientBackend {
    pub const fn new(fetcher: RemoteFetcher, client: GenerationClient) -> Self {
        Self { fetcher, client }
    }
}

#[async_trait]
impl StudioBackend for ClientBackend {
    async fn load_file(&self, path: &Path) -> remix_client::Result<ImageResource> {
        remix_core::encode_file(path).await.map_err(ClientError::from)
    }

    async fn fetch_url(&self, url: &str) -> remix_client::Result<ImageResource> {
        self.fetcher.fetch_as_resource(url).await
    }

    async fn generate(&self, resource: &ImageResource, prompt: &str) -> remix_client::Result<String> {
        self.client.generate(Some(resource), prompt).await
    }
}
