use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenVerifier};
use crate::auth::application::ports::outgoing::{AccessClaims, TokenVerifier};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-that-is-at-least-32-chars";
pub const ADMIN_EMAIL: &str = "owner@example.com";
pub const ADMIN_USER_ID: &str = "3f0c8a4e-0000-4000-8000-000000000001";

pub fn sign_token(claims: &AccessClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims_for(email: &str, exp_offset: i64) -> AccessClaims {
    AccessClaims {
        sub: ADMIN_USER_ID.to_string(),
        exp: Utc::now().timestamp() + exp_offset,
        aud: JwtConfig::DEFAULT_AUDIENCE.to_string(),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
    }
}

pub fn admin_token() -> String {
    sign_token(&claims_for(ADMIN_EMAIL, 3600), TEST_JWT_SECRET)
}

/// Past the verifier's leeway.
pub fn expired_token() -> String {
    sign_token(&claims_for(ADMIN_EMAIL, -3600), TEST_JWT_SECRET)
}

pub fn non_admin_token() -> String {
    sign_token(&claims_for("visitor@example.com", 3600), TEST_JWT_SECRET)
}

/// Verifier restricted to [`ADMIN_EMAIL`], as registered in app data.
pub fn test_token_verifier() -> Arc<dyn TokenVerifier + Send + Sync> {
    Arc::new(JwtTokenVerifier::new(JwtConfig::new(
        TEST_JWT_SECRET.to_string(),
        Some(ADMIN_EMAIL.to_string()),
    )))
}
