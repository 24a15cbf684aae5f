use actix_web::{delete, put, web, Responder};
use serde::Deserialize;

use super::editor_error_response;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::editor::domain::CategoryDraft;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// One entry of a whole-list save. Entries without an id get a fresh one.
#[derive(Debug, Deserialize)]
pub struct CategoryListItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub draft: CategoryDraft,
}

/// Replaces the stored list; categories missing from the body are deleted.
#[put("/api/admin/skill-categories")]
pub async fn replace_skill_categories_handler(
    _admin: AdminUser,
    body: web::Json<Vec<CategoryListItem>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let drafts = body
        .into_inner()
        .into_iter()
        .map(|item| (item.id.filter(|id| !id.trim().is_empty()), item.draft))
        .collect();

    match data.editor.replace_categories(drafts).await {
        Ok(categories) => ApiResponse::success(categories),
        Err(e) => editor_error_response(&e),
    }
}

#[put("/api/admin/skill-categories/{id}")]
pub async fn upsert_skill_category_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<CategoryDraft>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.editor.upsert_category(Some(&id), body.into_inner()).await {
        Ok(category) => ApiResponse::success(category),
        Err(e) => editor_error_response(&e),
    }
}

#[delete("/api/admin/skill-categories/{id}")]
pub async fn delete_skill_category_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.editor.delete_category(&path.into_inner()).await {
        Ok(remaining) => ApiResponse::success(remaining),
        Err(e) => editor_error_response(&e),
    }
}
