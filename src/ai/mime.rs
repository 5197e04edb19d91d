use std::path::Path;

const FALLBACK_MIME: &str = "image/jpeg";

/// Image MIME type from a file's extension, falling back to `image/jpeg`.
pub fn resolve_image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        other => {
            tracing::debug!(
                "Unrecognized image extension {:?} for {}, falling back to {}",
                other,
                path.display(),
                FALLBACK_MIME
            );
            FALLBACK_MIME
        }
    }
}
