pub mod get_content;
pub mod get_projects;
pub mod reload_content;

pub use get_content::{get_content_handler, get_content_status_handler};
pub use get_projects::get_projects_handler;
pub use reload_content::reload_content_handler;

use actix_web::HttpResponse;
use tracing::error;

use crate::modules::content::application::content_store::ContentStoreError;
use crate::shared::api::ApiResponse;

/// Maps store failures onto the API envelope. Shared with the admin routes.
pub fn store_error_response(err: &ContentStoreError) -> HttpResponse {
    match err {
        ContentStoreError::NotReady => {
            ApiResponse::service_unavailable("CONTENT_LOADING", "Content is still loading")
        }
        ContentStoreError::LoadFailed(message) => {
            ApiResponse::service_unavailable("CONTENT_UNAVAILABLE", message)
        }
        ContentStoreError::NotFound(id) => {
            ApiResponse::not_found("PROJECT_NOT_FOUND", &format!("Project {} not found", id))
        }
        ContentStoreError::Persistence(e) => {
            error!(error = %e, "content write failed");
            ApiResponse::error(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                &e.to_string(),
            )
        }
    }
}
