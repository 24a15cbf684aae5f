use email_address::EmailAddress;
use serde::Serialize;

pub const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Name is required")]
    EmptyName,
    #[error("Email is required")]
    EmptyEmail,
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Message is required")]
    EmptyMessage,
    #[error("Message is longer than {max} characters")]
    MessageTooLong { max: usize },
}

/// A visitor's message, trimmed and checked before it leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, SubmissionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SubmissionError::EmptyName);
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(SubmissionError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(SubmissionError::InvalidEmailFormat);
        }

        let message = message.trim();
        if message.is_empty() {
            return Err(SubmissionError::EmptyMessage);
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(SubmissionError::MessageTooLong {
                max: MAX_MESSAGE_CHARS,
            });
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
