pub mod projects;
pub mod site_settings;
pub mod skill_categories;
