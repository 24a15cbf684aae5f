pub mod form_relay;

pub use form_relay::{FormRelay, RelayError};
