use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer, Serialize};

// ========================= Credentials =========================

/// Email + password pair, validated before it is sent to the identity service.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl Credentials {
    pub fn new(email: String, password: String) -> Result<Self, CredentialsError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(CredentialsError::InvalidEmailFormat);
        }

        // Passwords are sent as typed; only emptiness is checked here.
        if password.trim().is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl<'de> Deserialize<'de> for Credentials {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            email: String,
            password: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        Credentials::new(helper.email, helper.password).map_err(serde::de::Error::custom)
    }
}

// ========================= Session =========================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

/// Tokens issued by the identity service after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}
