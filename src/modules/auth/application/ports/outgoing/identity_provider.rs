use async_trait::async_trait;

use crate::auth::application::domain::entities::{Credentials, Session};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("identity service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("identity service unreachable: {0}")]
    Network(String),

    #[error("unexpected identity service response: {0}")]
    MalformedResponse(String),
}

/// The hosted identity/session service. Passwords never touch this process's
/// storage; sign-in and sign-out are delegated.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError>;

    /// Invalidates the session the access token belongs to.
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
}
