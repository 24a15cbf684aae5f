use actix_web::{get, web, Responder};

use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[get("/api/admin/sections")]
pub async fn get_sections_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.editor.board().all())
}
