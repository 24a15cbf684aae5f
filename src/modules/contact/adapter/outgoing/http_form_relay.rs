use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::contact::application::domain::entities::ContactSubmission;
use crate::contact::application::ports::outgoing::{FormRelay, RelayError};

/// Internal seam over the relay endpoint.
#[async_trait]
trait RelayHttpClient: Send + Sync {
    /// POSTs JSON and returns the status plus raw body.
    async fn post_json(&self, body: Vec<u8>) -> Result<(u16, Vec<u8>), String>;
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    #[serde(rename = "_replyto")]
    reply_to: &'a str,
}

/// Posts contact submissions to a Formspree-style endpoint that accepts JSON
/// and answers 2xx on acceptance.
#[derive(Clone)]
pub struct HttpFormRelay {
    client: Arc<dyn RelayHttpClient>,
}

impl HttpFormRelay {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Arc::new(ReqwestRelayClient {
                http: reqwest::Client::new(),
                endpoint,
            }),
        }
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn RelayHttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FormRelay for HttpFormRelay {
    async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        let body = serde_json::to_vec(&RelayPayload {
            name: submission.name(),
            email: submission.email(),
            message: submission.message(),
            reply_to: submission.email(),
        })
        .map_err(|e| RelayError::Unavailable(e.to_string()))?;

        let (status, raw) = self
            .client
            .post_json(body)
            .await
            .map_err(RelayError::Unavailable)?;

        if (200..300).contains(&status) {
            return Ok(());
        }

        Err(RelayError::Rejected {
            status,
            message: String::from_utf8_lossy(&raw).into_owned(),
        })
    }
}

// ============================================================================
// reqwest client
// ============================================================================

struct ReqwestRelayClient {
    http: reqwest::Client,
    endpoint: String,
}

#[async_trait]
impl RelayHttpClient for ReqwestRelayClient {
    async fn post_json(&self, body: Vec<u8>) -> Result<(u16, Vec<u8>), String> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status().as_u16();
        let bytes = resp.bytes().await.map_err(|e| e.to_string())?;
        Ok((status, bytes.to_vec()))
    }
}
