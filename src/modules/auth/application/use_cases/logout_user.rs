use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::ports::outgoing::{IdentityError, IdentityProvider};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogoutError {
    #[error("Session revocation failed: {0}")]
    RevocationFailed(String),
}

#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, access_token: &str) -> Result<(), LogoutError>;
}

#[derive(Clone)]
pub struct LogoutUseCase {
    identity: Arc<dyn IdentityProvider>,
}

impl LogoutUseCase {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl ILogoutUseCase for LogoutUseCase {
    async fn execute(&self, access_token: &str) -> Result<(), LogoutError> {
        match self.identity.sign_out(access_token).await {
            Ok(()) => Ok(()),
            // Already gone on the identity side.
            Err(IdentityError::InvalidCredentials) => Ok(()),
            Err(e) => Err(LogoutError::RevocationFailed(e.to_string())),
        }
    }
}
