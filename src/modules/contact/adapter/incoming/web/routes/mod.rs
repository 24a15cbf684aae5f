pub mod submit_contact;

pub use submit_contact::{submit_contact_handler, ContactRequestDto, ContactSentResponse};
