use async_trait::async_trait;

use crate::modules::multimedia::application::domain::entities::AssetFolder;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("file is empty")]
    Empty,

    #[error("file is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// The storage service answered but refused the object.
    #[error("storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("storage unreachable: {0}")]
    Network(String),
}

/// Result of a best-effort delete. Deliberately not a `Result`: nothing
/// upstream may fail because of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted,
    /// The URL was not issued by this storage.
    Skipped,
    Failed(String),
}

#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Stores the bytes under a fresh key in `folder` and returns the public URL.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: AssetFolder,
    ) -> Result<String, UploadError>;

    /// Fire-and-log. Never errors.
    async fn delete(&self, public_url: &str) -> CleanupOutcome;
}
