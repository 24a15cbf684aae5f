use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::auth::application::domain::entities::{Credentials, Session, SessionUser};
use crate::auth::application::ports::outgoing::{IdentityError, IdentityProvider};
use crate::contact::application::domain::entities::ContactSubmission;
use crate::contact::application::ports::outgoing::{FormRelay, RelayError};
use crate::multimedia::application::domain::entities::AssetFolder;
use crate::multimedia::application::ports::outgoing::{BlobStorage, CleanupOutcome, UploadError};

// ──────────────────────────────────────────────────────────
// Identity service
// ──────────────────────────────────────────────────────────

enum IdentityBehavior {
    Accept(String),
    Reject,
    Unreachable,
}

pub struct StubIdentityProvider {
    behavior: IdentityBehavior,
    sign_ins: Arc<AtomicUsize>,
    sign_outs: Arc<AtomicUsize>,
}

impl StubIdentityProvider {
    pub const ACCESS_TOKEN: &'static str = "stub-access-token";

    fn with(behavior: IdentityBehavior) -> Self {
        Self {
            behavior,
            sign_ins: Arc::new(AtomicUsize::new(0)),
            sign_outs: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Signs in as `email` whatever the password.
    pub fn accepting(email: &str) -> Self {
        Self::with(IdentityBehavior::Accept(email.to_string()))
    }

    pub fn rejecting() -> Self {
        Self::with(IdentityBehavior::Reject)
    }

    pub fn unreachable() -> Self {
        Self::with(IdentityBehavior::Unreachable)
    }

    pub fn sign_in_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.sign_ins)
    }

    pub fn sign_out_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.sign_outs)
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, IdentityError> {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            IdentityBehavior::Accept(email) => Ok(Session {
                access_token: Self::ACCESS_TOKEN.to_string(),
                refresh_token: "stub-refresh-token".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
                user: SessionUser {
                    id: "3f0c8a4e-0000-4000-8000-000000000001".to_string(),
                    email: email.clone(),
                },
            }),
            IdentityBehavior::Reject => Err(IdentityError::InvalidCredentials),
            IdentityBehavior::Unreachable => {
                Err(IdentityError::Network("connection refused".to_string()))
            }
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), IdentityError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            IdentityBehavior::Unreachable => {
                Err(IdentityError::Network("connection refused".to_string()))
            }
            _ => Ok(()),
        }
    }
}

// ──────────────────────────────────────────────────────────
// Blob storage
// ──────────────────────────────────────────────────────────

pub type RecordedUpload = (AssetFolder, String, usize);

pub struct StubBlobStorage {
    result: Result<String, UploadError>,
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    deletes: Arc<Mutex<Vec<String>>>,
}

impl StubBlobStorage {
    /// Every upload succeeds with the same public URL.
    pub fn returning(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
            uploads: Arc::default(),
            deletes: Arc::default(),
        }
    }

    pub fn failing(err: UploadError) -> Self {
        Self {
            result: Err(err),
            uploads: Arc::default(),
            deletes: Arc::default(),
        }
    }

    /// Folder, content type and size of each upload attempt.
    pub fn uploads(&self) -> Arc<Mutex<Vec<RecordedUpload>>> {
        Arc::clone(&self.uploads)
    }

    pub fn deletes(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.deletes)
    }
}

#[async_trait]
impl BlobStorage for StubBlobStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: AssetFolder,
    ) -> Result<String, UploadError> {
        self.uploads
            .lock()
            .unwrap()
            .push((folder, content_type.to_string(), bytes.len()));
        self.result.clone()
    }

    async fn delete(&self, public_url: &str) -> CleanupOutcome {
        self.deletes.lock().unwrap().push(public_url.to_string());
        CleanupOutcome::Deleted
    }
}

// ──────────────────────────────────────────────────────────
// Form relay
// ──────────────────────────────────────────────────────────

pub struct StubFormRelay {
    failure: Option<RelayError>,
    sent: Arc<Mutex<Vec<ContactSubmission>>>,
}

impl StubFormRelay {
    pub fn accepting() -> Self {
        Self {
            failure: None,
            sent: Arc::default(),
        }
    }

    pub fn failing(err: RelayError) -> Self {
        Self {
            failure: Some(err),
            sent: Arc::default(),
        }
    }

    /// Submissions the relay accepted.
    pub fn sent(&self) -> Arc<Mutex<Vec<ContactSubmission>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl FormRelay for StubFormRelay {
    async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.sent.lock().unwrap().push(submission.clone());
        Ok(())
    }
}
