pub mod admin_projects;
pub mod sections;
pub mod settings;
pub mod skill_categories;

pub use admin_projects::{
    create_project_handler, delete_project_handler, list_admin_projects_handler,
    patch_project_handler, update_project_handler,
};
pub use sections::get_sections_handler;
pub use settings::{
    save_about_handler, save_contact_handler, save_footer_handler, save_hero_handler,
    save_services_handler,
};
pub use skill_categories::{
    delete_skill_category_handler, replace_skill_categories_handler, upsert_skill_category_handler,
};

use actix_web::HttpResponse;

use crate::content::adapter::incoming::web::routes::store_error_response;
use crate::editor::application::EditorError;
use crate::shared::api::ApiResponse;

pub fn editor_error_response(err: &EditorError) -> HttpResponse {
    match err {
        EditorError::Validation(e) => ApiResponse::bad_request("VALIDATION_ERROR", e.message),
        EditorError::Store(e) => store_error_response(e),
    }
}
