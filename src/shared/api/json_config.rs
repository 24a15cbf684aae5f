use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::web::JsonConfig;

use crate::shared::api::ApiResponse;

/// Settings documents (about with many entries) are the largest JSON bodies.
pub const JSON_BODY_LIMIT: usize = 512 * 1024;

pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let response = match &err {
                JsonPayloadError::ContentType => ApiResponse::error(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "UNSUPPORTED_MEDIA_TYPE",
                    "Expected an application/json body",
                ),
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    ApiResponse::payload_too_large("PAYLOAD_TOO_LARGE", &err.to_string())
                }
                _ => ApiResponse::bad_request("VALIDATION_ERROR", &err.to_string()),
            };
            InternalError::from_response(err, response).into()
        })
}
