use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;

use crate::modules::content::adapter::outgoing::sea_orm_entity::skill_categories::{
    ActiveModel, Column, Entity, Model,
};
use crate::modules::content::application::ports::outgoing::{
    Operation, PersistenceError, SkillCategoryRepository,
};
use crate::modules::content::domain::entities::{EntityKind, SkillCategory, SkillColorScheme};

#[derive(Clone)]
pub struct SkillCategoryRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SkillCategoryRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SkillCategoryRepository for SkillCategoryRepositoryPostgres {
    async fn fetch_all(&self) -> Result<Vec<SkillCategory>, PersistenceError> {
        let rows = Entity::find()
            .all(&*self.db)
            .await
            .map_err(|e| db_err(Operation::FetchAll, e))?;

        rows.into_iter().map(model_to_category).collect()
    }

    async fn upsert(&self, category: &SkillCategory) -> Result<(), PersistenceError> {
        upsert_on(&*self.db, category, Operation::Upsert).await
    }

    async fn remove(&self, id: &str) -> Result<(), PersistenceError> {
        Entity::delete_by_id(id.to_string())
            .exec(&*self.db)
            .await
            .map_err(|e| db_err(Operation::Remove, e))?;

        Ok(())
    }

    async fn replace_all(&self, categories: &[SkillCategory]) -> Result<(), PersistenceError> {
        let op = Operation::ReplaceAll;
        let txn = self.db.begin().await.map_err(|e| db_err(op, e))?;

        for category in categories {
            upsert_on(&txn, category, op).await?;
        }

        let keep: Vec<String> = categories.iter().map(|c| c.id.clone()).collect();
        let mut delete = Entity::delete_many();
        if !keep.is_empty() {
            delete = delete.filter(Column::Id.is_not_in(keep));
        }

        let removed = delete.exec(&txn).await.map_err(|e| db_err(op, e))?;

        txn.commit().await.map_err(|e| db_err(op, e))?;

        tracing::info!(
            kept = categories.len(),
            removed = removed.rows_affected,
            "skill categories replaced"
        );
        Ok(())
    }
}

async fn upsert_on<C: ConnectionTrait>(
    conn: &C,
    category: &SkillCategory,
    op: Operation,
) -> Result<(), PersistenceError> {
    let model = category_to_model(category, op)?;
    let active = ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        color_scheme: Set(model.color_scheme),
        skills: Set(model.skills),
    };

    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::Name, Column::ColorScheme, Column::Skills])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(|e| db_err(op, e))?;

    Ok(())
}

fn db_err(operation: Operation, err: sea_orm::DbErr) -> PersistenceError {
    tracing::error!(%operation, error = %err, "skill_categories query failed");
    PersistenceError::database(operation, EntityKind::SkillCategory, err)
}

pub(crate) fn model_to_category(model: Model) -> Result<SkillCategory, PersistenceError> {
    let skills: Vec<String> = serde_json::from_value(model.skills).map_err(|e| {
        PersistenceError::serialization(Operation::FetchAll, EntityKind::SkillCategory, e)
    })?;

    Ok(SkillCategory {
        id: model.id,
        name: model.name,
        color_scheme: SkillColorScheme::from_tag(Some(&model.color_scheme)),
        skills,
    })
}

pub(crate) fn category_to_model(
    category: &SkillCategory,
    op: Operation,
) -> Result<Model, PersistenceError> {
    let skills = serde_json::to_value(&category.skills)
        .map_err(|e| PersistenceError::serialization(op, EntityKind::SkillCategory, e))?;

    Ok(Model {
        id: category.id.clone(),
        name: category.name.clone(),
        color_scheme: category.color_scheme.as_str().to_string(),
        skills,
    })
}
