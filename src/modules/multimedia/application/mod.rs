pub mod asset_upload_service;
pub mod domain;
pub mod ports;
pub mod upload_tracker;

pub use asset_upload_service::AssetUploadService;
pub use upload_tracker::{UploadGuard, UploadTracker};
