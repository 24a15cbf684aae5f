use actix_web::{get, web, Responder};

use super::store_error_response;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[get("/api/projects")]
pub async fn get_projects_handler(data: web::Data<AppState>) -> impl Responder {
    let store = data.content.current().await;

    match store.projects().await {
        Ok(projects) => ApiResponse::success(projects),
        Err(e) => store_error_response(&e),
    }
}
