use actix_web::{delete, get, patch, post, put, web, Responder};
use serde::Deserialize;

use super::editor_error_response;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::content::adapter::incoming::web::routes::store_error_response;
use crate::content::domain::project_patch::ProjectPatch;
use crate::editor::domain::ProjectDraft;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

#[get("/api/admin/projects")]
pub async fn list_admin_projects_handler(
    _admin: AdminUser,
    query: web::Query<SearchQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let store = data.content.current().await;

    match store.search_projects(&query.search).await {
        Ok(projects) => ApiResponse::success(projects),
        Err(e) => store_error_response(&e),
    }
}

#[post("/api/admin/projects")]
pub async fn create_project_handler(
    _admin: AdminUser,
    body: web::Json<ProjectDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.editor.create_project(body.into_inner()).await {
        Ok(project) => ApiResponse::created(project),
        Err(e) => editor_error_response(&e),
    }
}

/// Partial update: only the fields present in the body change. `null`
/// clears an optional field.
#[patch("/api/admin/projects/{id}")]
pub async fn patch_project_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<ProjectPatch>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.editor.patch_project(&id, body.into_inner()).await {
        Ok(project) => ApiResponse::success(project),
        Err(e) => editor_error_response(&e),
    }
}

/// The body is the full edited draft; fields left out are cleared.
#[put("/api/admin/projects/{id}")]
pub async fn update_project_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<ProjectDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.editor.update_project(&id, body.into_inner()).await {
        Ok(project) => ApiResponse::success(project),
        Err(e) => editor_error_response(&e),
    }
}

#[delete("/api/admin/projects/{id}")]
pub async fn delete_project_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.editor.delete_project(&id).await {
        Ok(_) => ApiResponse::no_content(),
        Err(e) => editor_error_response(&e),
    }
}
