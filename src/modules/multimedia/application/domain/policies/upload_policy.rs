use crate::modules::multimedia::application::domain::entities::AssetFolder;
use crate::modules::multimedia::application::ports::outgoing::blob_storage::UploadError;

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub allowed_image_types: &'static [&'static str],
    pub allowed_document_types: &'static [&'static str],
    pub bucket_name: String,
}

impl UploadPolicy {
    pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024; // 5MB
    pub const DEFAULT_IMAGE_TYPES: &'static [&'static str] = &[
        "image/jpeg",
        "image/png",
        "image/webp",
        "image/gif",
        "image/svg+xml",
    ];
    pub const DEFAULT_DOCUMENT_TYPES: &'static [&'static str] = &["application/pdf"];

    pub fn new(bucket_name: String) -> Self {
        Self {
            max_file_size_bytes: Self::MAX_FILE_SIZE_BYTES,
            allowed_image_types: Self::DEFAULT_IMAGE_TYPES,
            allowed_document_types: Self::DEFAULT_DOCUMENT_TYPES,
            bucket_name,
        }
    }

    /// Validates an upload and returns the file extension to store it under.
    pub fn check(
        &self,
        folder: AssetFolder,
        content_type: &str,
        size: usize,
    ) -> Result<&'static str, UploadError> {
        if size == 0 {
            return Err(UploadError::Empty);
        }

        if size as u64 > self.max_file_size_bytes {
            return Err(UploadError::TooLarge {
                size: size as u64,
                max: self.max_file_size_bytes,
            });
        }

        let mime = normalize_mime(content_type);
        let allowed = self.allowed_image_types.contains(&mime.as_str())
            || (folder.accepts_documents() && self.allowed_document_types.contains(&mime.as_str()));

        if !allowed {
            return Err(UploadError::UnsupportedType(mime));
        }

        extension_for(&mime).ok_or(UploadError::UnsupportedType(mime))
    }
}

/// Lowercase, parameters dropped, and a bare extension ("png") promoted to
/// its MIME type.
fn normalize_mime(content_type: &str) -> String {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match base.trim_start_matches('.') {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "webp" => "image/webp".to_string(),
        "gif" => "image/gif".to_string(),
        "svg" => "image/svg+xml".to_string(),
        "pdf" => "application/pdf".to_string(),
        _ => base,
    }
}

/// Canonical MIME type for an extension returned by [`UploadPolicy::check`].
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "jpg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn extension_for(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        "image/svg+xml" => Some("svg"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}
