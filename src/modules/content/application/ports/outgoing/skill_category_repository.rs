use async_trait::async_trait;

use super::PersistenceError;
use crate::modules::content::domain::entities::SkillCategory;

#[async_trait]
pub trait SkillCategoryRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<SkillCategory>, PersistenceError>;

    async fn upsert(&self, category: &SkillCategory) -> Result<(), PersistenceError>;

    async fn remove(&self, id: &str) -> Result<(), PersistenceError>;

    /// Makes the stored set exactly `categories`: upserts each one and deletes
    /// every stored row whose id is not in the list, as one unit.
    async fn replace_all(&self, categories: &[SkillCategory]) -> Result<(), PersistenceError>;
}
