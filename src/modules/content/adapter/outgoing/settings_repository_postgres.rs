use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use std::sync::Arc;

use crate::modules::content::adapter::outgoing::sea_orm_entity::site_settings::{
    ActiveModel, Column, Entity,
};
use crate::modules::content::application::ports::outgoing::{
    Operation, PersistenceError, SettingsRepository,
};
use crate::modules::content::domain::entities::SettingsKey;

#[derive(Clone)]
pub struct SettingsRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SettingsRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryPostgres {
    async fn fetch(&self, key: SettingsKey) -> Result<Option<Value>, PersistenceError> {
        let row = Entity::find_by_id(key.as_str().to_string())
            .one(&*self.db)
            .await
            .map_err(|e| db_err(Operation::FetchOne, key, e))?;

        // A stored JSON null counts as unconfigured too.
        Ok(row.map(|r| r.value).filter(|v| !v.is_null()))
    }

    async fn save(&self, key: SettingsKey, value: Value) -> Result<(), PersistenceError> {
        let model = ActiveModel {
            key: Set(key.as_str().to_string()),
            value: Set(value),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Key)
                    .update_columns([Column::Value, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .map_err(|e| db_err(Operation::Upsert, key, e))?;

        tracing::info!(key = %key, "settings document saved");
        Ok(())
    }
}

fn db_err(operation: Operation, key: SettingsKey, err: sea_orm::DbErr) -> PersistenceError {
    tracing::error!(%operation, key = %key, error = %err, "site_settings query failed");
    PersistenceError::database(operation, key.into(), err)
}
