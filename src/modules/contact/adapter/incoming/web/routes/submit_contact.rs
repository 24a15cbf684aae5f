use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::contact::application::domain::entities::ContactSubmission;
use crate::contact::application::ports::outgoing::RelayError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ContactRequestDto {
    #[schema(example = "Abebe Bikila")]
    #[serde(default)]
    pub name: String,

    #[schema(example = "abebe@example.com")]
    #[serde(default)]
    pub email: String,

    #[schema(example = "I'd like to talk about a project.")]
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ContactSentResponse {
    #[schema(example = "Message sent")]
    message: String,
}

/// Contact form
///
/// Validates the visitor's message and forwards it to the form relay.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequestDto,
    responses(
        (status = 200, description = "Relayed", body = inline(SuccessResponse<ContactSentResponse>)),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 502, description = "Form relay refused or unreachable", body = ErrorResponse),
    )
)]
#[post("/api/contact")]
pub async fn submit_contact_handler(
    req: web::Json<ContactRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let submission = match ContactSubmission::new(&dto.name, &dto.email, &dto.message) {
        Ok(s) => s,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.submit_contact_use_case.execute(submission).await {
        Ok(()) => ApiResponse::success(ContactSentResponse {
            message: "Message sent".to_string(),
        }),
        Err(RelayError::Rejected { status, .. }) => {
            error!(status, "Form relay rejected contact message");
            ApiResponse::bad_gateway("RELAY_REJECTED", "The message could not be delivered")
        }
        Err(RelayError::Unavailable(msg)) => {
            error!(error = %msg, "Form relay unreachable");
            ApiResponse::bad_gateway("RELAY_UNAVAILABLE", "Messaging is unavailable right now")
        }
    }
}
