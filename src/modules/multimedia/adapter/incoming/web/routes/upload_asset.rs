use actix_web::{get, http::StatusCode, post, web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::multimedia::application::domain::entities::AssetFolder;
use crate::multimedia::application::ports::outgoing::blob_storage::UploadError;
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    /// Record the upload belongs to; drives the busy marker.
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadedAsset {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveUploads {
    pub owner_ids: Vec<String>,
}

pub fn upload_error_response(err: &UploadError) -> HttpResponse {
    match err {
        UploadError::Empty => ApiResponse::bad_request("EMPTY_FILE", &err.to_string()),
        UploadError::TooLarge { .. } => {
            ApiResponse::payload_too_large("FILE_TOO_LARGE", &err.to_string())
        }
        UploadError::UnsupportedType(_) => ApiResponse::error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_FILE_TYPE",
            &err.to_string(),
        ),
        UploadError::Rejected { .. } => {
            ApiResponse::bad_gateway("STORAGE_REJECTED", &err.to_string())
        }
        UploadError::Network(_) => {
            ApiResponse::bad_gateway("STORAGE_UNAVAILABLE", "Storage is unreachable")
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────────────────
//

/// Raw-body upload. The `Content-Type` header names the file type.
#[post("/api/admin/uploads/{folder}")]
pub async fn upload_asset_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let folder: AssetFolder = match path.into_inner().parse() {
        Ok(f) => f,
        Err(e) => return ApiResponse::bad_request("INVALID_FOLDER", &e.to_string()),
    };

    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let owner_id = query
        .into_inner()
        .owner_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| folder.as_str().to_string());

    match data
        .uploads
        .upload(&owner_id, folder, &content_type, body.to_vec())
        .await
    {
        Ok(url) => {
            info!(%folder, owner_id = %owner_id, "asset stored");
            ApiResponse::created(UploadedAsset { url })
        }
        Err(e) => {
            if matches!(e, UploadError::Network(_)) {
                error!(%folder, error = %e, "storage unreachable");
            }
            upload_error_response(&e)
        }
    }
}

#[get("/api/admin/uploads/active")]
pub async fn get_active_uploads_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    ApiResponse::success(ActiveUploads {
        owner_ids: data.uploads.tracker().active_owners(),
    })
}
