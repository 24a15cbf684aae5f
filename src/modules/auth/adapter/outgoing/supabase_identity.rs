use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::application::domain::entities::{Credentials, Session, SessionUser};
use crate::auth::application::ports::outgoing::{IdentityError, IdentityProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
struct IdentityHttpError {
    status: Option<u16>,
    message: String,
}

/// Internal seam over the identity REST API.
#[async_trait]
trait IdentityHttpClient: Send + Sync {
    /// POSTs a JSON body and returns the raw response body on 2xx.
    async fn post(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, IdentityHttpError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Password sign-in and sign-out against a Supabase-compatible auth service.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: Arc<dyn IdentityHttpClient>,
}

impl SupabaseIdentityProvider {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Arc::new(ReqwestIdentityClient {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                anon_key,
            }),
        }
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn IdentityHttpClient>) -> Self {
        Self { client }
    }
}

fn map_http_error(err: IdentityHttpError) -> IdentityError {
    match err.status {
        None => IdentityError::Network(err.message),
        Some(400) | Some(401) | Some(403) => IdentityError::InvalidCredentials,
        Some(status) => IdentityError::Rejected {
            status,
            message: err.message,
        },
    }
}

fn into_session(resp: TokenResponse, fallback_email: &str) -> Session {
    let expires_at = resp
        .expires_at
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .unwrap_or_else(|| Utc::now() + chrono::Duration::seconds(resp.expires_in.unwrap_or(3600)));

    Session {
        access_token: resp.access_token,
        refresh_token: resp.refresh_token,
        expires_at,
        user: SessionUser {
            id: resp.user.id,
            email: resp
                .user
                .email
                .unwrap_or_else(|| fallback_email.to_string()),
        },
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        let body = serde_json::to_vec(&serde_json::json!({
            "email": credentials.email(),
            "password": credentials.password(),
        }))
        .map_err(|e| IdentityError::MalformedResponse(e.to_string()))?;

        let raw = self
            .client
            .post("/auth/v1/token?grant_type=password", None, body)
            .await
            .map_err(|e| {
                tracing::info!(email = %credentials.email(), status = ?e.status, "sign-in refused");
                map_http_error(e)
            })?;

        let resp: TokenResponse = serde_json::from_slice(&raw)
            .map_err(|e| IdentityError::MalformedResponse(e.to_string()))?;

        Ok(into_session(resp, credentials.email()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.client
            .post("/auth/v1/logout", Some(access_token), Vec::new())
            .await
            .map(|_| ())
            .map_err(map_http_error)
    }
}

// ============================================================================
// reqwest client
// ============================================================================

struct ReqwestIdentityClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[async_trait]
impl IdentityHttpClient for ReqwestIdentityClient {
    async fn post(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, IdentityHttpError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .header(
                "authorization",
                format!("Bearer {}", bearer.unwrap_or(&self.anon_key)),
            )
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| IdentityHttpError {
                status: None,
                message: e.to_string(),
            })?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| IdentityHttpError {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(IdentityHttpError {
                status: Some(status.as_u16()),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

// ============================================================================
// Tests
// ============================================================================
