//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults. A `.env` file is honored when present.

use std::env;

/// API service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub server_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// JWT signing secret shared with the identity provider
    pub jwt_secret: String,

    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./rentora.db".to_string()),

            jwt_secret: env::var("JWT_SECRET")
                // Development fallback; production MUST set JWT_SECRET.
                .unwrap_or_else(|_| "rentora-dev-secret-change-in-production".to_string()),

            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_env() {
        let config = Config::from_env().unwrap();
        assert!(!config.database_path.is_empty());
        assert!(!config.jwt_secret.is_empty());
    }
}
