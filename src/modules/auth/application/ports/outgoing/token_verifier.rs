use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    TokenExpired,
    InvalidSignature,
    InvalidAudience,
    MalformedToken,
    /// Valid token, but not for the site owner.
    NotAdmin,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::TokenExpired => write!(f, "Token has expired"),
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::InvalidAudience => write!(f, "Token was issued for another audience"),
            TokenError::MalformedToken => write!(f, "Malformed token"),
            TokenError::NotAdmin => write!(f, "Account is not allowed to edit content"),
        }
    }
}

impl Error for TokenError {}

/// Claims carried by the identity service's access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub exp: i64,
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError>;
}
