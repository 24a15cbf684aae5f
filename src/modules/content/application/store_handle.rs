use std::sync::Arc;
use tokio::sync::RwLock;

use super::content_store::{ContentGateways, ContentStore, ContentStoreError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReloadError {
    /// Only a failed instance may be replaced.
    #[error("content is not in the error state")]
    NotFailed,

    #[error(transparent)]
    Load(#[from] ContentStoreError),
}

/// Owns the live [`ContentStore`]. Recovery from a failed load means building
/// a fresh instance, never retrying the old one.
pub struct ContentStoreHandle {
    gateways: ContentGateways,
    current: RwLock<Arc<ContentStore>>,
}

impl ContentStoreHandle {
    pub fn new(gateways: ContentGateways) -> Self {
        let store = Arc::new(ContentStore::new(gateways.clone()));
        Self {
            gateways,
            current: RwLock::new(store),
        }
    }

    pub async fn current(&self) -> Arc<ContentStore> {
        self.current.read().await.clone()
    }

    pub async fn load(&self) -> Result<(), ContentStoreError> {
        self.current().await.load().await
    }

    pub async fn reload(&self) -> Result<Arc<ContentStore>, ReloadError> {
        let fresh = {
            let mut current = self.current.write().await;
            if !current.is_failed().await {
                return Err(ReloadError::NotFailed);
            }

            let fresh = Arc::new(ContentStore::new(self.gateways.clone()));
            *current = fresh.clone();
            fresh
        };

        tracing::info!("content store replaced, reloading");
        fresh.load().await?;
        Ok(fresh)
    }
}
