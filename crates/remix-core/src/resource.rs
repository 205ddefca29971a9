use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::error::{FormatError, Result};

/// A named binary image with its MIME type
///
/// Built by the encoder or the remote fetcher and never mutated afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    name: String,
    mime_type: String,
    data: Bytes,
}

impl ImageResource {
    /// Wrap raw bytes that are already known to be an image of `mime_type`
    ///
    /// Use [`crate::encode`] when the type still has to be determined.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Result<Self> {
        let name = name.into();
        let mime_type = mime_type.into();
        let data = data.into();

        if data.is_empty() {
            return Err(FormatError::Empty);
        }

        if !is_image_mime(&mime_type) {
            return Err(FormatError::UnknownType(name));
        }

        Ok(Self { name, mime_type, data })
    }

    /// Parse a `data:<mime>;base64,<payload>` URI
    pub fn from_data_uri(name: impl Into<String>, uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(FormatError::MalformedDataUri("missing 'data:' scheme"))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or(FormatError::MalformedDataUri("missing payload separator"))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(FormatError::MalformedDataUri("payload is not base64"))?;

        if mime_type.is_empty() {
            return Err(FormatError::MalformedDataUri("missing MIME type"));
        }

        if payload.is_empty() {
            return Err(FormatError::MalformedDataUri("missing payload"));
        }

        let data = STANDARD.decode(payload)?;

        Self::new(name, mime_type, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// Standard (padded) base64 encoding of the bytes
    pub fn base64_payload(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Render as `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        data_uri(&self.mime_type, &self.base64_payload())
    }
}

/// Assemble a data URI from a MIME type and an already-encoded payload
pub fn data_uri(mime_type: &str, base64_payload: &str) -> String {
    format!("data:{mime_type};base64,{base64_payload}")
}

pub(crate) fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .split_once('/')
        .is_some_and(|(kind, subtype)| kind.eq_ignore_ascii_case("image") && !subtype.is_empty())
}
