use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    LoginRequestDto, LoginResponse, LoginUserInfo, LogoutResponseBody, SessionInfo,
};
use crate::contact::adapter::incoming::web::routes::{ContactRequestDto, ContactSentResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "1.0.0",
        description = "Admin sign-in and the public contact form of the portfolio site"
    ),
    paths(
        // Auth
        crate::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::auth::adapter::incoming::web::routes::logout_user::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::get_session::get_session_handler,

        // Contact
        crate::contact::adapter::incoming::web::routes::submit_contact::submit_contact_handler,
    ),
    components(
        schemas(
            SuccessResponse<LoginResponse>,
            ErrorResponse,
            ErrorDetail,

            LoginRequestDto,
            LoginResponse,
            LoginUserInfo,
            LogoutResponseBody,
            SessionInfo,

            ContactRequestDto,
            ContactSentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin session endpoints"),
        (name = "contact", description = "Visitor contact form"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
