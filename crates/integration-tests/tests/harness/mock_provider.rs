//! Mock Gemini `generateContent` server for integration tests

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// How the mock answers generation calls
#[derive(Debug, Clone)]
pub enum Reply {
    /// A text part followed by an inline image
    Image { mime_type: String, data: String },
    /// Only text, no inline data
    TextOnly,
    /// Error status with a Google-style error body
    Error { status: u16, message: String },
}

impl Reply {
    /// Default successful reply
    pub fn png(data: &str) -> Self {
        Self::Image {
            mime_type: "image/png".to_owned(),
            data: data.to_owned(),
        }
    }
}

/// Mock provider that records what it receives
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockProviderState>,
}

struct MockProviderState {
    reply: Reply,
    request_count: AtomicU32,
    last_call: Mutex<Option<String>>,
    last_api_key: Mutex<Option<String>>,
    last_body: Mutex<Option<serde_json::Value>>,
}

impl MockProvider {
    /// Start a mock answering every call with `reply`
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockProviderState {
            reply,
            request_count: AtomicU32::new(0),
            last_call: Mutex::new(None),
            last_api_key: Mutex::new(None),
            last_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1beta/models/{call}", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

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

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of generation calls received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Last `<model>:<method>` path segment
    pub fn last_call(&self) -> Option<String> {
        self.state.last_call.lock().unwrap().clone()
    }

    /// Value of `x-goog-api-key` on the last call
    pub fn last_api_key(&self) -> Option<String> {
        self.state.last_api_key.lock().unwrap().clone()
    }

    /// JSON body of the last call
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.state.last_body.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(
    State(state): State<Arc<MockProviderState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    *state.last_call.lock().unwrap() = Some(call);
    *state.last_api_key.lock().unwrap() = headers
        .get("x-goog-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    *state.last_body.lock().unwrap() = Some(body);

    match &state.reply {
        Reply::Image { mime_type, data } => Json(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here is your variation" },
                        { "inlineData": { "mimeType": mime_type, "data": data } }
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .into_response(),
        Reply::TextOnly => Json(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "I cannot draw that" }] }
            }]
        }))
        .into_response(),
        Reply::Error { status, message } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = serde_json::json!({
                "error": { "code": status.as_u16(), "message": message, "status": "FAILED" }
            });
            (status, Json(body)).into_response()
        }
    }
}
