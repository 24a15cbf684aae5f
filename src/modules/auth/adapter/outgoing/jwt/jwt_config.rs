#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret the identity service signs access tokens with.
    pub secret_key: String,
    pub audience: String,
    /// Only this account may pass admin checks, when set.
    pub admin_email: Option<String>,
    pub leeway_seconds: u64,
}

impl JwtConfig {
    pub const DEFAULT_AUDIENCE: &'static str = "authenticated";

    pub fn new(secret_key: String, admin_email: Option<String>) -> Self {
        Self {
            secret_key,
            audience: Self::DEFAULT_AUDIENCE.to_string(),
            admin_email: admin_email.map(|e| e.trim().to_lowercase()),
            leeway_seconds: 30,
        }
    }
}
