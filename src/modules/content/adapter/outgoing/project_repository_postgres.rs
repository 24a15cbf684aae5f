use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::sync::Arc;

use crate::modules::content::adapter::outgoing::sea_orm_entity::projects::{
    ActiveModel, Column, Entity, Model,
};
use crate::modules::content::application::ports::outgoing::{
    Operation, PersistenceError, ProjectRepository,
};
use crate::modules::content::domain::entities::{EntityKind, Project};

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct ProjectRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryPostgres {
    async fn fetch_all(&self) -> Result<Vec<Project>, PersistenceError> {
        let rows = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| db_err(Operation::FetchAll, e))?;

        rows.into_iter().map(model_to_project).collect()
    }

    async fn upsert(&self, project: &Project) -> Result<(), PersistenceError> {
        let model = project_to_active_model(project)?;

        Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Title,
                        Column::Description,
                        Column::LongDescription,
                        Column::Image,
                        Column::Tags,
                        Column::DemoLink,
                        Column::CodeLink,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .map_err(|e| db_err(Operation::Upsert, e))?;

        tracing::debug!(project_id = %project.id, "project upserted");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), PersistenceError> {
        Entity::delete_by_id(id.to_string())
            .exec(&*self.db)
            .await
            .map_err(|e| db_err(Operation::Remove, e))?;

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn db_err(operation: Operation, err: sea_orm::DbErr) -> PersistenceError {
    tracing::error!(%operation, error = %err, "projects query failed");
    PersistenceError::database(operation, EntityKind::Project, err)
}

pub(crate) fn model_to_project(model: Model) -> Result<Project, PersistenceError> {
    let tags: Vec<String> = serde_json::from_value(model.tags).map_err(|e| {
        PersistenceError::serialization(Operation::FetchAll, EntityKind::Project, e)
    })?;

    Ok(Project {
        id: model.id,
        title: model.title,
        description: model.description,
        long_description: model.long_description,
        image: model.image,
        tags,
        demo_link: model.demo_link,
        code_link: model.code_link,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub(crate) fn project_to_model(project: &Project) -> Result<Model, PersistenceError> {
    let tags = serde_json::to_value(&project.tags)
        .map_err(|e| PersistenceError::serialization(Operation::Upsert, EntityKind::Project, e))?;

    Ok(Model {
        id: project.id.clone(),
        title: project.title.clone(),
        description: project.description.clone(),
        long_description: project.long_description.clone(),
        image: project.image.clone(),
        tags,
        demo_link: project.demo_link.clone(),
        code_link: project.code_link.clone(),
        created_at: project.created_at.fixed_offset(),
        updated_at: project.updated_at.fixed_offset(),
    })
}

fn project_to_active_model(project: &Project) -> Result<ActiveModel, PersistenceError> {
    let model = project_to_model(project)?;

    Ok(ActiveModel {
        id: Set(model.id),
        title: Set(model.title),
        description: Set(model.description),
        long_description: Set(model.long_description),
        image: Set(model.image),
        tags: Set(model.tags),
        demo_link: Set(model.demo_link),
        code_link: Set(model.code_link),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::content::application::ports::outgoing::PersistenceFailure;
    use chrono::{DateTime, Duration, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};
    use serde_json::json;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn create_test_project(id: &str, created: DateTime<Utc>) -> Project {
        Project {
            id: id.to_string(),
            title: "Music App".to_string(),
            description: "Streams music".to_string(),
            long_description: "A longer story".to_string(),
            image: Some("https://cdn.example.com/music.png".to_string()),
            tags: vec!["React".to_string(), "Node.js".to_string()],
            demo_link: None,
            code_link: Some("https://github.com/example/music".to_string()),
            created_at: created,
            updated_at: created + Duration::minutes(5),
        }
    }

    #[test]
    fn test_row_mapping_round_trips_with_optionals_present() {
        let project = create_test_project("proj-1", at(9));

        let back = model_to_project(project_to_model(&project).unwrap()).unwrap();

        assert_eq!(back, project);
    }

    #[test]
    fn test_row_mapping_round_trips_with_optionals_absent() {
        let mut project = create_test_project("proj-2", at(9));
        project.image = None;
        project.code_link = None;
        project.tags.clear();

        let model = project_to_model(&project).unwrap();
        assert_eq!(model.tags, json!([]));

        let back = model_to_project(model).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_malformed_tags_surface_as_serialization_error() {
        let mut model = project_to_model(&create_test_project("proj-3", at(9))).unwrap();
        model.tags = json!({ "not": "an array" });

        let err = model_to_project(model).unwrap_err();

        assert!(matches!(err.failure, PersistenceFailure::Serialization(_)));
        assert_eq!(err.entity, EntityKind::Project);
    }

    #[tokio::test]
    async fn test_fetch_all_empty_table_returns_empty_vec() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));

        let projects = repo.fetch_all().await.unwrap();

        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_orders_by_created_at_desc() {
        let newer = project_to_model(&create_test_project("proj-new", at(12))).unwrap();
        let older = project_to_model(&create_test_project("proj-old", at(8))).unwrap();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![newer, older]])
                .into_connection(),
        );

        let repo = ProjectRepositoryPostgres::new(db.clone());
        let projects = repo.fetch_all().await.unwrap();
        drop(repo);

        assert_eq!(projects[0].id, "proj-new");
        assert_eq!(projects[1].id, "proj-old");

        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        let sql = format!("{:?}", log);
        assert!(sql.contains("ORDER BY"));
        assert!(sql.contains("DESC"));
    }

    #[tokio::test]
    async fn test_upsert_issues_insert_on_conflict() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results(vec![MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ProjectRepositoryPostgres::new(db.clone());
        repo.upsert(&create_test_project("proj-1", at(9)))
            .await
            .unwrap();
        drop(repo);

        let sql = format!(
            "{:?}",
            Arc::try_unwrap(db).ok().unwrap().into_transaction_log()
        );
        assert!(sql.contains("INSERT INTO"));
        assert!(sql.contains("ON CONFLICT"));
    }

    #[tokio::test]
    async fn test_upsert_database_error_is_typed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors(vec![sea_orm::DbErr::Query(RuntimeErr::Internal(
                "insert failed".into(),
            ))])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));

        let err = repo
            .upsert(&create_test_project("proj-1", at(9)))
            .await
            .unwrap_err();

        assert_eq!(err.operation, Operation::Upsert);
        assert_eq!(err.entity, EntityKind::Project);
        assert!(matches!(err.failure, PersistenceFailure::Database(_)));
    }

    #[tokio::test]
    async fn test_remove_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));

        assert!(repo.remove("proj-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_database_error_is_typed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors(vec![sea_orm::DbErr::Query(RuntimeErr::Internal(
                "delete failed".into(),
            ))])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));

        let err = repo.remove("proj-1").await.unwrap_err();

        assert_eq!(err.operation, Operation::Remove);
    }
}
