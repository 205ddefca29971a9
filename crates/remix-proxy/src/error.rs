use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use remix_core::ErrorBody;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Backend proxy errors with their HTTP status codes
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Anything but POST on the generate route
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Missing or unparsable request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// Request body exceeded the configured limit
    #[error("request body is too large, limit is {0} bytes")]
    PayloadTooLarge(usize),

    /// No provider credential is configured
    #[error("the API key is not configured on the server")]
    MissingCredential,

    /// Provider API answered with a non-success status
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// Provider could not be reached
    #[error("failed to generate image: could not reach the image provider")]
    Connection(String),

    /// Provider answered but no part carried inline image data
    #[error("failed to generate image: the provider returned no image")]
    NoImage,

    /// Unexpected failure
    /// If Some(message), the message is safe to show
    /// If None, details must not leak
    #[error("failed to generate image: {}", .0.as_deref().unwrap_or("an unknown error occurred on the server"))]
    Internal(Option<String>),
}

impl ProxyError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::MissingCredential | Self::Connection(_) | Self::NoImage | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to expose to clients
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.client_message(),
        };

        let mut response = (status, Json(body)).into_response();

        if matches!(self, Self::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }

        response
    }
}
