pub mod auth;
pub mod contact;
pub mod content;
pub mod editor;
pub mod multimedia;
