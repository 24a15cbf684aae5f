use async_trait::async_trait;

use crate::contact::application::domain::entities::ContactSubmission;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The relay answered and refused the submission.
    #[error("form relay rejected submission ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("form relay unreachable: {0}")]
    Unavailable(String),
}

/// Forwards a contact submission to the external form service.
#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError>;
}
