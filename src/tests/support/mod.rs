pub mod app_state_builder;
pub mod auth_helper;
pub mod content_fixtures;
pub mod in_memory_gateways;
pub mod stubs;
