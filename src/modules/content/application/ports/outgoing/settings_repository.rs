use async_trait::async_trait;
use serde_json::Value;

use super::{Operation, PersistenceError};
use crate::modules::content::domain::entities::{SettingsDocument, SettingsKey};

/// Key/value store for singleton settings documents.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// `None` means the key was never configured. That is not an error.
    async fn fetch(&self, key: SettingsKey) -> Result<Option<Value>, PersistenceError>;

    /// Wholesale replace of the document under `key`.
    async fn save(&self, key: SettingsKey, value: Value) -> Result<(), PersistenceError>;
}

pub async fn fetch_document<D: SettingsDocument>(
    repo: &dyn SettingsRepository,
) -> Result<Option<D>, PersistenceError> {
    let Some(value) = repo.fetch(D::KEY).await? else {
        return Ok(None);
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| PersistenceError::serialization(Operation::FetchOne, D::KEY.into(), e))
}

pub async fn save_document<D: SettingsDocument>(
    repo: &dyn SettingsRepository,
    document: &D,
) -> Result<(), PersistenceError> {
    let value = serde_json::to_value(document)
        .map_err(|e| PersistenceError::serialization(Operation::Upsert, D::KEY.into(), e))?;

    repo.save(D::KEY, value).await
}
