//! Configuration module for Aloion.

use serde::Deserialize;
use std::path::Path;

use crate::auth::MAX_TTL_HOURS;
use crate::{AloionError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin without credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/aloion.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Session token configuration.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Default token lifetime in hours.
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: u32,
}

fn default_token_expiry_hours() -> u32 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_hours: default_token_expiry_hours(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_expiry_hours", &self.token_expiry_hours)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error, off).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// File that log events are appended to, in addition to stdout.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session token configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AloionError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AloionError::Config(format!("parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ALOION_JWT_SECRET`: the token signing secret
    /// - `ALOION_TOKEN_EXPIRY_HOURS`: the default token lifetime
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("ALOION_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }
        if let Ok(hours) = std::env::var("ALOION_TOKEN_EXPIRY_HOURS") {
            match hours.parse() {
                Ok(hours) => self.auth.token_expiry_hours = hours,
                Err(_) => tracing::warn!(value = %hours, "Ignoring invalid ALOION_TOKEN_EXPIRY_HOURS"),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// The signing secret must be set and the default expiry must be within
    /// `1..=MAX_TTL_HOURS`.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(AloionError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via the ALOION_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.auth.token_expiry_hours == 0 || self.auth.token_expiry_hours > MAX_TTL_HOURS {
            return Err(AloionError::Config(format!(
                "token_expiry_hours must be between 1 and {MAX_TTL_HOURS}, got {}",
                self.auth.token_expiry_hours
            )));
        }
        Ok(())
    }
}
