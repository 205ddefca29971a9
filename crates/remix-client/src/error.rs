use remix_core::FormatError;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from fetching images and requesting generations
///
/// The `Display` output of every variant is written for end users.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Local data could not be encoded as an image
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Required input was missing or invalid; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// The transport failed before any response arrived
    #[error("network failure or blocked request; check the URL and your internet connection")]
    Network(#[source] reqwest::Error),

    /// The generation server could not be reached
    #[error("could not reach the generation server; check that it is running and try again")]
    Unreachable(#[source] reqwest::Error),

    /// A response arrived but the host did not hand out the image
    #[error("the image host blocked access to this URL; try downloading the image and uploading it manually")]
    Blocked,

    /// The image URL answered with a non-success status
    #[error("failed to fetch image, status: {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The proxy or provider produced no usable image
    #[error("{0}")]
    Generation(String),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
