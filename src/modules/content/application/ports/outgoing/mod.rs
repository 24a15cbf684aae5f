pub mod persistence_error;
pub mod project_repository;
pub mod settings_repository;
pub mod skill_category_repository;

pub use persistence_error::{Operation, PersistenceError, PersistenceFailure};
pub use project_repository::ProjectRepository;
pub use settings_repository::{fetch_document, save_document, SettingsRepository};
pub use skill_category_repository::SkillCategoryRepository;
