use async_trait::async_trait;
use std::sync::Arc;

use crate::contact::application::domain::entities::ContactSubmission;
use crate::contact::application::ports::outgoing::{FormRelay, RelayError};

#[async_trait]
pub trait ISubmitContactUseCase: Send + Sync {
    async fn execute(&self, submission: ContactSubmission) -> Result<(), RelayError>;
}

pub struct SubmitContactUseCase {
    relay: Arc<dyn FormRelay>,
}

impl SubmitContactUseCase {
    pub fn new(relay: Arc<dyn FormRelay>) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl ISubmitContactUseCase for SubmitContactUseCase {
    async fn execute(&self, submission: ContactSubmission) -> Result<(), RelayError> {
        match self.relay.relay(&submission).await {
            Ok(()) => {
                tracing::info!(sender = %submission.email(), "contact message relayed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(sender = %submission.email(), error = %e, "contact relay failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        Relay {}

        #[async_trait]
        impl FormRelay for Relay {
            async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError>;
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission::new("Abebe", "abebe@example.com", "Let's work together").unwrap()
    }

    #[tokio::test]
    async fn test_relays_once() {
        let mut relay = MockRelay::new();
        relay
            .expect_relay()
            .withf(|s| s.email() == "abebe@example.com" && s.name() == "Abebe")
            .times(1)
            .returning(|_| Ok(()));

        let use_case = SubmitContactUseCase::new(Arc::new(relay));
        assert!(use_case.execute(submission()).await.is_ok());
    }

    #[tokio::test]
    async fn test_relay_failure_surfaces() {
        let mut relay = MockRelay::new();
        relay
            .expect_relay()
            .times(1)
            .returning(|_| Err(RelayError::Unavailable("timeout".to_string())));

        let use_case = SubmitContactUseCase::new(Arc::new(relay));
        assert_eq!(
            use_case.execute(submission()).await,
            Err(RelayError::Unavailable("timeout".to_string()))
        );
    }
}
