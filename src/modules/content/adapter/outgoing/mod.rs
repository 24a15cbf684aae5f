pub mod project_repository_postgres;
pub mod sea_orm_entity;
pub mod settings_repository_postgres;
pub mod skill_category_repository_postgres;

pub use project_repository_postgres::ProjectRepositoryPostgres;
pub use settings_repository_postgres::SettingsRepositoryPostgres;
pub use skill_category_repository_postgres::SkillCategoryRepositoryPostgres;
