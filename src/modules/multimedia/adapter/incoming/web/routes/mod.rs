mod upload_asset;

pub use upload_asset::{get_active_uploads_handler, upload_asset_handler, upload_error_response};
