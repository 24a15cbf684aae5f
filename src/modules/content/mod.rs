pub mod adapter;
pub mod application;
pub mod domain;

pub use application::content_store::{ContentSnapshot, ContentStore, ContentStoreError, StoreState};
pub use application::store_handle::ContentStoreHandle;
