pub mod http_form_relay;

pub use http_form_relay::HttpFormRelay;
