use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::Key;

/// Minimum length of the session signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("SECRET must be at least {MIN_SECRET_LEN} bytes, got {0}")]
    SecretTooShort(usize),

    #[error("unsupported DBURL scheme: {0}")]
    UnsupportedDatabase(String),
}

/// Where user documents (and sessions) are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Database {
    Memory,
    Postgres(String),
}

/// Process settings: defaults, then an optional `config.toml`, then the environment.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// `memory://` or a `postgres://` connection string.
    pub dburl: String,
    /// Session cookie signing secret.
    pub secret: String,
    pub host: String,
    pub port: u16,
    pub secure_cookies: bool,
    /// Sessions expire after this many days without a request.
    pub session_days: i64,
}

/// Cookie options for the session layer.
#[derive(Clone)]
pub struct SessionOptions {
    pub key: Key,
    pub secure: bool,
    pub inactivity: Duration,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment(Environment::default())
    }

    pub(crate) fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("dburl", "memory://")?
            .set_default("secret", "")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("secure_cookies", false)?
            .set_default("session_days", 7)?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }

    pub fn database(&self) -> Result<Database, SettingsError> {
        if self.dburl.starts_with("memory:") {
            Ok(Database::Memory)
        } else if self.dburl.starts_with("postgres://") || self.dburl.starts_with("postgresql://") {
            Ok(Database::Postgres(self.dburl.clone()))
        } else {
            let scheme = self.dburl.split(':').next().unwrap_or_default();
            Err(SettingsError::UnsupportedDatabase(scheme.to_string()))
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_options(&self) -> Result<SessionOptions, SettingsError> {
        let secret = self.secret.as_bytes();
        if secret.len() < MIN_SECRET_LEN {
            return Err(SettingsError::SecretTooShort(secret.len()));
        }
        Ok(SessionOptions {
            key: Key::from(secret),
            secure: self.secure_cookies,
            inactivity: Duration::days(self.session_days),
        })
    }
}
