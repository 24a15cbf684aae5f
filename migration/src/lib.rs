pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_table_projects;
mod m20250601_000002_create_table_skill_categories;
mod m20250601_000003_create_table_site_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_table_projects::Migration),
            Box::new(m20250601_000002_create_table_skill_categories::Migration),
            Box::new(m20250601_000003_create_table_site_settings::Migration),
        ]
    }
}
