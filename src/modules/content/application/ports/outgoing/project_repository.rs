use async_trait::async_trait;

use super::PersistenceError;
use crate::modules::content::domain::entities::Project;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects, newest first. Empty table yields an empty vec.
    async fn fetch_all(&self) -> Result<Vec<Project>, PersistenceError>;

    /// Insert or fully overwrite the row keyed by `project.id`.
    async fn upsert(&self, project: &Project) -> Result<(), PersistenceError>;

    async fn remove(&self, id: &str) -> Result<(), PersistenceError>;
}
