//! Mock image host for fetcher tests

use std::net::SocketAddr;

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

use super::PIXEL_PNG;

/// Serves `/photos/pixel.png`, an HTML hotlink page at `/hotlink.png` and 404
/// everywhere else
pub struct MockImageHost {
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl MockImageHost {
    pub async fn start() -> anyhow::Result<Self> {
        let app = Router::new()
            .route(
                "/photos/pixel.png",
                routing::get(|| async { ([(header::CONTENT_TYPE, "image/png")], PIXEL_PNG) }),
            )
            .route(
                "/hotlink.png",
                routing::get(|| async {
                    (
                        [(header::CONTENT_TYPE, "text/html")],
                        "<html><body>hotlinking is not allowed</body></html>",
                    )
                }),
            )
            .fallback(|| async { StatusCode::NOT_FOUND.into_response() });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown })
    }

    /// URL of `path` on the host
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for MockImageHost {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
