use std::path::Path;

use bytes::Bytes;

use crate::error::{FormatError, Result};
use crate::format::ImageFormat;
use crate::resource::{ImageResource, is_image_mime};

/// Turn raw bytes into an [`ImageResource`]
///
/// The MIME type is taken from `declared_mime` when it names an image type,
/// otherwise from the content's magic bytes, otherwise from the extension of
/// `name`. Fails when none of them yields an image type.
pub fn encode(name: impl Into<String>, data: impl Into<Bytes>, declared_mime: Option<&str>) -> Result<ImageResource> {
    let name = name.into();
    let data = data.into();

    if data.is_empty() {
        return Err(FormatError::Empty);
    }

    let mime_type = resolve_mime(&name, &data, declared_mime).ok_or_else(|| FormatError::UnknownType(name.clone()))?;

    ImageResource::new(name, mime_type, data)
}

/// Read a local file and encode it
pub async fn encode_file(path: impl AsRef<Path>) -> Result<ImageResource> {
    let path = path.as_ref();

    let data = tokio::fs::read(path).await.map_err(|source| FormatError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    encode(name, data, None)
}

fn resolve_mime(name: &str, data: &[u8], declared_mime: Option<&str>) -> Option<String> {
    // Drop parameters such as `; charset=binary`
    let declared = declared_mime
        .and_then(|m| m.split(';').next())
        .map(str::trim)
        .filter(|m| is_image_mime(m));

    if let Some(mime) = declared {
        return Some(mime.to_ascii_lowercase());
    }

    ImageFormat::from_magic_bytes(data)
        .or_else(|| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ImageFormat::from_extension)
        })
        .map(|format| format.mime_type().to_owned())
}
