/// Core result type
pub type Result<T> = std::result::Result<T, FormatError>;

/// Raised when a source cannot be turned into a MIME type + payload pair
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The source contained no bytes
    #[error("invalid file format or unable to read the data: the image is empty")]
    Empty,

    /// No image MIME type could be determined
    #[error("invalid file format: could not determine an image type for '{0}'")]
    UnknownType(String),

    /// A data URI did not have the `data:<mime>;base64,<payload>` shape
    #[error("invalid file format: malformed data URI ({0})")]
    MalformedDataUri(&'static str),

    /// The base64 payload could not be decoded
    #[error("invalid file format: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Reading the source failed
    #[error("unable to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
