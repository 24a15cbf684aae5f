pub mod submit_contact;
