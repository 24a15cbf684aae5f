use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::multimedia::application::domain::entities::{
    key_from_public_url, public_url, storage_key, AssetFolder,
};
use crate::modules::multimedia::application::domain::policies::upload_policy::{
    mime_for_extension, UploadPolicy,
};
use crate::modules::multimedia::application::ports::outgoing::blob_storage::{
    BlobStorage, CleanupOutcome, UploadError,
};

const CACHE_CONTROL_SECONDS: &str = "3600";

#[derive(Debug, Clone, PartialEq, Eq)]
struct StorageHttpError {
    /// `None` when the request never got an answer.
    status: Option<u16>,
    message: String,
}

/// Internal seam so the adapter can be tested without a live storage API.
#[async_trait]
trait StorageHttpClient: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageHttpError>;

    async fn remove_objects(&self, bucket: &str, keys: &[String]) -> Result<(), StorageHttpError>;
}

/// Public-bucket storage speaking the Supabase Storage REST API.
#[derive(Clone)]
pub struct SupabaseBlobStorage {
    client: Arc<dyn StorageHttpClient>,
    base_url: String,
    policy: UploadPolicy,
}

impl SupabaseBlobStorage {
    pub fn new(base_url: String, api_key: String, policy: UploadPolicy) -> Self {
        let client = ReqwestStorageClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        };

        Self {
            client: Arc::new(client),
            base_url,
            policy,
        }
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn StorageHttpClient>, base_url: &str, policy: UploadPolicy) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            policy,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.policy.bucket_name
    }
}

fn map_upload_error(err: StorageHttpError, size: usize, policy: &UploadPolicy) -> UploadError {
    match err.status {
        None => UploadError::Network(err.message),
        Some(413) => UploadError::TooLarge {
            size: size as u64,
            max: policy.max_file_size_bytes,
        },
        Some(415) => UploadError::UnsupportedType(err.message),
        Some(status) => UploadError::Rejected {
            status,
            message: err.message,
        },
    }
}

#[async_trait]
impl BlobStorage for SupabaseBlobStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: AssetFolder,
    ) -> Result<String, UploadError> {
        let size = bytes.len();
        let extension = self.policy.check(folder, content_type, size)?;
        let key = storage_key(folder, extension);
        let mime = mime_for_extension(extension);

        self.client
            .put_object(self.bucket(), &key, mime, bytes)
            .await
            .map_err(|e| {
                tracing::warn!(%folder, key = %key, error = %e.message, "upload failed");
                map_upload_error(e, size, &self.policy)
            })?;

        tracing::info!(%folder, key = %key, size, "asset uploaded");
        Ok(public_url(&self.base_url, self.bucket(), &key))
    }

    async fn delete(&self, url: &str) -> CleanupOutcome {
        let Some(key) = key_from_public_url(url, &self.base_url, self.bucket()) else {
            tracing::debug!(url, "not a storage url, skipping delete");
            return CleanupOutcome::Skipped;
        };

        match self.client.remove_objects(self.bucket(), &[key.clone()]).await {
            Ok(()) => {
                tracing::info!(key = %key, "asset deleted");
                CleanupOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e.message, "failed to delete asset");
                CleanupOutcome::Failed(e.message)
            }
        }
    }
}

// ============================================================================
// reqwest client
// ============================================================================

struct ReqwestStorageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ReqwestStorageClient {
    async fn check(resp: reqwest::Response) -> Result<(), StorageHttpError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = resp
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());

        Err(StorageHttpError {
            status: Some(status.as_u16()),
            message,
        })
    }
}

fn network_error(err: reqwest::Error) -> StorageHttpError {
    StorageHttpError {
        status: None,
        message: err.to_string(),
    }
}

#[async_trait]
impl StorageHttpClient for ReqwestStorageClient {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageHttpError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, key);

        let resp = self
            .http
            .post(url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("content-type", content_type)
            .header("cache-control", format!("max-age={}", CACHE_CONTROL_SECONDS))
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(network_error)?;

        Self::check(resp).await
    }

    async fn remove_objects(&self, bucket: &str, keys: &[String]) -> Result<(), StorageHttpError> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, bucket);
        let body = serde_json::to_vec(&serde_json::json!({ "prefixes": keys })).map_err(|e| {
            StorageHttpError {
                status: None,
                message: e.to_string(),
            }
        })?;

        let resp = self
            .http
            .delete(url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(network_error)?;

        Self::check(resp).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const BASE: &str = "https://xyz.supabase.co";

    struct FakeStorageClient {
        puts: Mutex<Vec<(String, String, String, usize)>>,
        removes: Mutex<Vec<(String, Vec<String>)>>,
        put_result: Mutex<Result<(), StorageHttpError>>,
        remove_result: Mutex<Result<(), StorageHttpError>>,
    }

    impl Default for FakeStorageClient {
        fn default() -> Self {
            Self {
                puts: Mutex::new(Vec::new()),
                removes: Mutex::new(Vec::new()),
                put_result: Mutex::new(Ok(())),
                remove_result: Mutex::new(Ok(())),
            }
        }
    }

    impl FakeStorageClient {
        fn set_put_result(&self, r: Result<(), StorageHttpError>) {
            *self.put_result.lock().unwrap() = r;
        }

        fn set_remove_result(&self, r: Result<(), StorageHttpError>) {
            *self.remove_result.lock().unwrap() = r;
        }
    }

    #[async_trait]
    impl StorageHttpClient for FakeStorageClient {
        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            content_type: &str,
            bytes: Vec<u8>,
        ) -> Result<(), StorageHttpError> {
            self.puts.lock().unwrap().push((
                bucket.to_string(),
                key.to_string(),
                content_type.to_string(),
                bytes.len(),
            ));
            self.put_result.lock().unwrap().clone()
        }

        async fn remove_objects(
            &self,
            bucket: &str,
            keys: &[String],
        ) -> Result<(), StorageHttpError> {
            self.removes
                .lock()
                .unwrap()
                .push((bucket.to_string(), keys.to_vec()));
            self.remove_result.lock().unwrap().clone()
        }
    }

    fn storage(fake: Arc<FakeStorageClient>) -> SupabaseBlobStorage {
        SupabaseBlobStorage::with_client(
            fake,
            BASE,
            UploadPolicy::new("portfolio-images".to_string()),
        )
    }

    fn http_error(status: Option<u16>, message: &str) -> StorageHttpError {
        StorageHttpError {
            status,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_returns_public_url_under_folder() {
        let fake = Arc::new(FakeStorageClient::default());
        let svc = storage(fake.clone());

        let url = svc
            .upload(vec![1, 2, 3], "image/png", AssetFolder::Experience)
            .await
            .unwrap();

        let puts = fake.puts.lock().unwrap().clone();
        assert_eq!(puts.len(), 1);
        let (bucket, key, mime, size) = &puts[0];
        assert_eq!(bucket, "portfolio-images");
        assert!(key.starts_with("experience/"));
        assert!(key.ends_with(".png"));
        assert_eq!(mime, "image/png");
        assert_eq!(*size, 3);
        assert_eq!(
            url,
            format!(
                "{}/storage/v1/object/public/portfolio-images/{}",
                BASE, key
            )
        );
    }

    #[tokio::test]
    async fn test_policy_violation_never_reaches_storage() {
        let fake = Arc::new(FakeStorageClient::default());
        let svc = storage(fake.clone());

        let err = svc
            .upload(vec![0; 10], "application/zip", AssetFolder::Projects)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::UnsupportedType(_)));
        assert!(fake.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_maps_permission_failure() {
        let fake = Arc::new(FakeStorageClient::default());
        fake.set_put_result(Err(http_error(Some(403), "new row violates policy")));

        let err = storage(fake)
            .upload(vec![1], "image/jpeg", AssetFolder::Profile)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UploadError::Rejected {
                status: 403,
                message: "new row violates policy".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_upload_maps_network_and_size_failures() {
        let fake = Arc::new(FakeStorageClient::default());
        fake.set_put_result(Err(http_error(None, "connection refused")));
        let err = storage(fake.clone())
            .upload(vec![1], "image/jpeg", AssetFolder::Profile)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Network(_)));

        fake.set_put_result(Err(http_error(Some(413), "Payload too large")));
        let err = storage(fake)
            .upload(vec![1, 2], "image/jpeg", AssetFolder::Profile)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { size: 2, .. }));
    }

    #[tokio::test]
    async fn test_delete_maps_url_back_to_key() {
        let fake = Arc::new(FakeStorageClient::default());
        let url = format!(
            "{}/storage/v1/object/public/portfolio-images/projects/1-0-abcdef.png",
            BASE
        );

        let outcome = storage(fake.clone()).delete(&url).await;

        assert_eq!(outcome, CleanupOutcome::Deleted);
        let removes = fake.removes.lock().unwrap().clone();
        assert_eq!(
            removes,
            vec![(
                "portfolio-images".to_string(),
                vec!["projects/1-0-abcdef.png".to_string()]
            )]
        );
    }

    #[tokio::test]
    async fn test_delete_foreign_url_is_silent_noop() {
        let fake = Arc::new(FakeStorageClient::default());

        let outcome = storage(fake.clone())
            .delete("https://images.unsplash.com/photo-123")
            .await;

        assert_eq!(outcome, CleanupOutcome::Skipped);
        assert!(fake.removes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_same_bucket_on_another_project_is_skipped() {
        let fake = Arc::new(FakeStorageClient::default());

        let outcome = storage(fake.clone())
            .delete("https://someone-else.supabase.co/storage/v1/object/public/portfolio-images/profile/me.png")
            .await;

        assert_eq!(outcome, CleanupOutcome::Skipped);
        assert!(fake.removes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported_not_raised() {
        let fake = Arc::new(FakeStorageClient::default());
        fake.set_remove_result(Err(http_error(Some(500), "boom")));
        let url = format!(
            "{}/storage/v1/object/public/portfolio-images/profile/me.png",
            BASE
        );

        let outcome = storage(fake).delete(&url).await;

        assert_eq!(outcome, CleanupOutcome::Failed("boom".to_string()));
    }
}
