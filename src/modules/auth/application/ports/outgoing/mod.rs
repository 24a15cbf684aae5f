pub mod identity_provider;
pub mod token_verifier;

pub use identity_provider::{IdentityError, IdentityProvider};
pub use token_verifier::{AccessClaims, TokenError, TokenVerifier};
