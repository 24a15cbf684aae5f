use std::sync::Arc;

use crate::modules::multimedia::application::domain::entities::AssetFolder;
use crate::modules::multimedia::application::ports::outgoing::blob_storage::{
    BlobStorage, CleanupOutcome, UploadError,
};
use crate::modules::multimedia::application::upload_tracker::UploadTracker;

/// Uploads on behalf of a record, marking that record busy while in flight.
#[derive(Clone)]
pub struct AssetUploadService {
    storage: Arc<dyn BlobStorage>,
    tracker: UploadTracker,
}

impl AssetUploadService {
    pub fn new(storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            storage,
            tracker: UploadTracker::new(),
        }
    }

    pub async fn upload(
        &self,
        owner_id: &str,
        folder: AssetFolder,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let _busy = self.tracker.begin(owner_id);

        self.storage
            .upload(bytes, content_type, folder)
            .await
            .inspect_err(|e| tracing::warn!(owner_id, %folder, error = %e, "upload rejected"))
    }

    pub async fn discard(&self, url: &str) -> CleanupOutcome {
        self.storage.delete(url).await
    }

    pub fn tracker(&self) -> &UploadTracker {
        &self.tracker
    }
}
