use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::fmt;

use crate::auth::application::ports::outgoing::token_verifier::{
    AccessClaims, TokenError, TokenVerifier,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenVerifier {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenVerifier")
            .field("audience", &self.config.audience)
            .finish()
    }
}

impl JwtTokenVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_seconds;
        validation.set_audience(&[self.config.audience.as_str()]);
        validation
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let decoded = decode::<AccessClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Token verification failed: Wrong audience");
                        TokenError::InvalidAudience
                    }
                    _ => {
                        tracing::warn!(error = %e, "Token verification failed: Malformed token");
                        TokenError::MalformedToken
                    }
                }
            })?;

        let claims = decoded.claims;

        if let Some(admin) = &self.config.admin_email {
            let is_admin = claims
                .email
                .as_deref()
                .is_some_and(|email| email.eq_ignore_ascii_case(admin));
            if !is_admin {
                tracing::warn!(sub = %claims.sub, "Token belongs to a non-admin account");
                return Err(TokenError::NotAdmin);
            }
        }

        Ok(claims)
    }
}
