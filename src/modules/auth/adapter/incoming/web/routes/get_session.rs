use actix_web::{get, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[schema(example = "3f0c8a4e-1b2d-4e5f-8a9b-0c1d2e3f4a5b")]
    user_id: String,
    #[schema(example = "owner@example.com")]
    email: Option<String>,
    /// Unix seconds
    #[schema(example = 1893456000)]
    expires_at: i64,
}

/// Current admin session
///
/// 200 while the bearer token is valid, 401 otherwise. The admin screen uses
/// this to pick between the editor and the sign-in form.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Signed in", body = inline(SuccessResponse<SessionInfo>)),
        (status = 401, description = "Signed out or token expired", body = ErrorResponse),
        (status = 403, description = "Account is not the site owner", body = ErrorResponse),
    )
)]
#[get("/api/auth/session")]
pub async fn get_session_handler(admin: AdminUser) -> impl Responder {
    ApiResponse::success(SessionInfo {
        user_id: admin.user_id,
        email: admin.email,
        expires_at: admin.expires_at,
    })
}
