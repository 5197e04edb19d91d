use super::mime::resolve_image_mime;
use crate::models::ImagePart;
use crate::{Error, Result};
use base64::Engine as _;
use std::io::ErrorKind;
use std::path::Path;

/// Read an image file and base64-encode it for embedding in a request.
///
/// Fails with [`Error::NotFound`] when `path` is missing or is not a regular
/// file. No size limit is applied here; providers reject oversized images.
pub async fn encode_image(path: &Path) -> Result<ImagePart> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!("Encoding image {} ({} bytes)", path.display(), bytes.len());

    Ok(ImagePart {
        mime_type: resolve_image_mime(path),
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
    })
}
