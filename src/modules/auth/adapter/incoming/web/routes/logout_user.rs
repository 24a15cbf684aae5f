use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct LogoutResponseBody {
    #[schema(example = "Logged out successfully")]
    message: String,
}

/// Admin sign-out
///
/// Revokes the session on the identity service. The client is considered
/// signed out even if revocation fails.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Signed out", body = inline(SuccessResponse<LogoutResponseBody>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    if let Err(e) = data
        .logout_user_use_case
        .execute(&admin.access_token)
        .await
    {
        error!(user_id = %admin.user_id, error = %e, "Session revocation failed during logout");
    } else {
        info!(user_id = %admin.user_id, "Admin signed out");
    }

    ApiResponse::success(LogoutResponseBody {
        message: "Logged out successfully".to_string(),
    })
}
