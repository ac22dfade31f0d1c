//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first by `main`.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use tracing::warn;

/// Signing secret used when `JWT_SECRET` is not set. Development only.
const DEV_JWT_SECRET: &str = "stockpile-dev-secret-change-in-production";

/// Default token lifetime in seconds.
pub const DEFAULT_JWT_EXP_SECS: i64 = 3600;

/// API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port
    pub port: u16,

    /// HTTP bind address
    pub bind_addr: String,

    /// SQLite database file
    pub database_path: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Secret key for signing tokens
    #[serde(skip_serializing)]
    pub jwt_secret: String,

    /// Token lifetime in seconds
    pub jwt_exp_secs: i64,

    /// Seeded administrator
    pub admin_name: String,
    pub admin_email: String,
    #[serde(skip_serializing)]
    pub admin_password: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if secret.is_empty() => {
                return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
            }
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let config = AppConfig {
            port: get("PORT", "8080")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            bind_addr: get("BIND_ADDR", "0.0.0.0"),

            database_path: get("DATABASE_PATH", "./stockpile.db"),

            db_max_connections: get("DB_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            jwt_secret,

            jwt_exp_secs: get("JWT_EXP", &DEFAULT_JWT_EXP_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXP".to_string()))?,

            admin_name: get("ADMIN_NAME", "Admin"),
            admin_email: get("ADMIN_EMAIL", "admin@example.com"),
            admin_password: get("ADMIN_PASSWORD", "password"),
        };

        if config.jwt_exp_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_EXP".to_string()));
        }

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
