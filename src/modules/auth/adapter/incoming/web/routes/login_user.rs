use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::{Credentials, Session};
use crate::auth::application::use_cases::login_user::LoginError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Login request from the admin screen
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "owner@example.com")]
    pub email: String,

    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Identity-service access token; send as `Authorization: Bearer ...`
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,

    #[schema(example = "v1.MjQ5ZjY3...")]
    refresh_token: String,

    #[schema(example = "2030-01-01T00:00:00Z")]
    expires_at: String,

    user: LoginUserInfo,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserInfo {
    #[schema(example = "3f0c8a4e-1b2d-4e5f-8a9b-0c1d2e3f4a5b")]
    id: String,

    #[schema(example = "owner@example.com")]
    email: String,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at: session.expires_at.to_rfc3339(),
            user: LoginUserInfo {
                id: session.user.id,
                email: session.user.email,
            },
        }
    }
}

/// Admin sign-in
///
/// Delegates the email/password check to the identity service and returns its session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Signed in", body = inline(SuccessResponse<LoginResponse>)),
        (status = 400, description = "Malformed email or empty password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account is not the site owner", body = ErrorResponse),
        (status = 502, description = "Identity service failed", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let credentials = match Credentials::new(dto.email, dto.password) {
        Ok(c) => c,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!(email = %credentials.email(), "Login attempt");

    match data.login_user_use_case.execute(credentials).await {
        Ok(session) => {
            info!(user_id = %session.user.id, "Admin signed in");
            ApiResponse::success(LoginResponse::from(session))
        }
        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        Err(LoginError::NotAdmin) => {
            ApiResponse::forbidden("ADMIN_ONLY", "This account cannot edit content")
        }
        Err(LoginError::Upstream(msg)) => {
            error!(error = %msg, "Identity service failure during login");
            ApiResponse::bad_gateway("IDENTITY_UNAVAILABLE", "Sign-in is unavailable right now")
        }
    }
}
