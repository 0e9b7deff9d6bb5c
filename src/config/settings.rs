//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub retention: RetentionConfig,
    pub ping: PingConfig,
    pub health: HealthConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Users allowed to configure any chat regardless of chat role.
    #[serde(default)]
    pub admin_ids: Vec<i64>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration for configuration-UI sessions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    /// TTL applied to configuration sessions.
    pub session_ttl_seconds: u64,
}

/// Message retention defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetentionConfig {
    /// Human-message delay applied when a chat's config row is first created
    /// on bot-add. 0 leaves auto-deletion off until an admin configures it.
    pub default_delay_seconds: i64,
    /// Network timeout applied to each deletion attempt.
    pub delete_timeout_seconds: u64,
}

/// Liveness ping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PingConfig {
    /// Target URL; pinging is disabled when unset.
    pub url: Option<String>,
    pub interval_seconds: u64,
    pub timeout_seconds: u64,
}

/// Health endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthConfig {
    pub bind_addr: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling log files; stdout only when unset.
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SWEEPBOT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::SweepBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/sweepbot".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "sweepbot:".to_string(),
                session_ttl_seconds: 300,
            },
            retention: RetentionConfig {
                default_delay_seconds: 0,
                delete_timeout_seconds: 10,
            },
            ping: PingConfig {
                url: None,
                interval_seconds: 30,
                timeout_seconds: 10,
            },
            health: HealthConfig {
                bind_addr: "0.0.0.0:8000".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
