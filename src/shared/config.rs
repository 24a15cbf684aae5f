use std::env;

pub const DEFAULT_STORAGE_BUCKET: &str = "portfolio-images";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Everything the process reads from its environment at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Falls back to the anon key; storage policies decide what it may do.
    pub supabase_service_key: Option<String>,
    pub supabase_jwt_secret: String,
    pub storage_bucket: String,
    pub form_relay_endpoint: String,
    pub admin_email: Option<String>,
    pub run_migrations: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("supabase_url", &self.supabase_url)
            .field("storage_bucket", &self.storage_bucket)
            .field("form_relay_endpoint", &self.form_relay_endpoint)
            .field("admin_email", &self.admin_email)
            .field("run_migrations", &self.run_migrations)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same rules as [`AppConfig::from_env`] over any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let port = required("PORT")?;
        let port = port.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
            name: "PORT",
            reason: e.to_string(),
        })?;

        let run_migrations = match optional("RUN_MIGRATIONS").as_deref().map(str::trim) {
            None => false,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "RUN_MIGRATIONS",
                    reason: format!("expected true or false, got {other:?}"),
                })
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: required("HOST")?,
            port,
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            supabase_service_key: optional("SUPABASE_SERVICE_KEY"),
            supabase_jwt_secret: required("SUPABASE_JWT_SECRET")?,
            storage_bucket: optional("STORAGE_BUCKET")
                .unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string()),
            form_relay_endpoint: required("FORM_RELAY_ENDPOINT")?,
            admin_email: optional("ADMIN_EMAIL"),
            run_migrations,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
