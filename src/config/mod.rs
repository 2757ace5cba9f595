use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_hours: i64,
    pub bootstrap_admin_password: String,
    pub login_rate_limit_per_minute: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| AppError::Configuration("JWT_SECRET not set".to_string()))?,
                token_expiry_hours: env::var("TOKEN_EXPIRY_HOURS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid TOKEN_EXPIRY_HOURS".to_string())
                    })?,
                bootstrap_admin_password: env::var("BOOTSTRAP_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "admin123".to_string()),
                login_rate_limit_per_minute: env::var("LOGIN_RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid LOGIN_RATE_LIMIT_PER_MINUTE".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.len() < 32 {
            return Err(AppError::Configuration(
                "JWT_SECRET must be at least 32 bytes".to_string(),
            ));
        }

        if self.auth.token_expiry_hours <= 0 {
            return Err(AppError::Configuration(
                "Token expiry must be greater than 0".to_string(),
            ));
        }

        if self.auth.login_rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Login rate limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
