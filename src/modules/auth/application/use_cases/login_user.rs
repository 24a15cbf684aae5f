use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::domain::entities::{Credentials, Session};
use crate::auth::application::ports::outgoing::{IdentityError, IdentityProvider};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is not allowed to edit content")]
    NotAdmin,

    #[error("Identity service error: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, credentials: Credentials) -> Result<Session, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase {
    identity: Arc<dyn IdentityProvider>,
    admin_email: Option<String>,
}

impl LoginUserUseCase {
    /// `admin_email` restricts sign-in to one account; `None` admits any
    /// account the identity service accepts.
    pub fn new(identity: Arc<dyn IdentityProvider>, admin_email: Option<String>) -> Self {
        Self {
            identity,
            admin_email: admin_email.map(|e| e.trim().to_lowercase()),
        }
    }
}

#[async_trait]
impl ILoginUserUseCase for LoginUserUseCase {
    async fn execute(&self, credentials: Credentials) -> Result<Session, LoginError> {
        let session = self
            .identity
            .sign_in(&credentials)
            .await
            .map_err(|e| match e {
                IdentityError::InvalidCredentials => LoginError::InvalidCredentials,
                other => LoginError::Upstream(other.to_string()),
            })?;

        if let Some(admin) = &self.admin_email {
            if !session.user.email.eq_ignore_ascii_case(admin) {
                tracing::warn!(email = %session.user.email, "sign-in by non-admin account");
                if let Err(e) = self.identity.sign_out(&session.access_token).await {
                    tracing::warn!(error = %e, "failed to revoke non-admin session");
                }
                return Err(LoginError::NotAdmin);
            }
        }

        Ok(session)
    }
}
