use actix_web::{get, web, Responder};

use super::store_error_response;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Whole snapshot for the public site. Nothing partial is ever served.
#[get("/api/content")]
pub async fn get_content_handler(data: web::Data<AppState>) -> impl Responder {
    let store = data.content.current().await;

    match store.snapshot().await {
        Ok(snapshot) => ApiResponse::success(snapshot),
        Err(e) => store_error_response(&e),
    }
}

#[get("/api/content/status")]
pub async fn get_content_status_handler(data: web::Data<AppState>) -> impl Responder {
    let store = data.content.current().await;
    ApiResponse::success(store.status().await)
}
