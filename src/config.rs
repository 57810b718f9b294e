use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://movierama.db` or `sqlite::memory:`
    #[serde(skip_serializing)]
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HS256 signing secret for both access and refresh tokens
    #[serde(skip_serializing)]
    pub secret: SecretString,
    pub access_token_expiration_minutes: i64,
    pub refresh_token_expiration_days: i64,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        // Secrets are skipped when serializing the defaults, so they are
        // re-added explicitly as overridable defaults.
        let defaults = Self::default();
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .set_default("database.url", defaults.database.url.expose_secret())?
            .set_default("jwt.secret", defaults.jwt.secret.expose_secret())?
            // Override with environment variables using `MOVIERAMA__` prefix and `__` separator
            // e.g., MOVIERAMA__JWT__SECRET="my_secret"
            .add_source(
                config::Environment::with_prefix("MOVIERAMA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ServerConfig {
    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://movierama.db".to_string().into(),
            max_connections: 5,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "insecure-development-secret-change-me".to_string().into(),
            access_token_expiration_minutes: 5,
            refresh_token_expiration_days: 1,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets are skipped by serde
        match serde_json::to_string_pretty(&self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "Error serializing config"),
        }
    }
}
