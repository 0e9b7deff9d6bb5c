//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{Result, SweepBotError};

use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_retention_config(&settings.retention)?;
    validate_ping_config(&settings.ping)?;
    validate_health_config(&settings.health)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(SweepBotError::Config("Bot token is required".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SweepBotError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(SweepBotError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SweepBotError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SweepBotError::Config("Redis URL is required".to_string()));
    }

    if config.session_ttl_seconds == 0 {
        return Err(SweepBotError::Config(
            "Session TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate retention configuration
fn validate_retention_config(config: &super::RetentionConfig) -> Result<()> {
    if config.default_delay_seconds < 0 {
        return Err(SweepBotError::Config(
            "Default delay cannot be negative".to_string(),
        ));
    }

    if config.delete_timeout_seconds == 0 {
        return Err(SweepBotError::Config(
            "Delete timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate liveness ping configuration
fn validate_ping_config(config: &super::PingConfig) -> Result<()> {
    if let Some(url) = &config.url {
        url::Url::parse(url)
            .map_err(|e| SweepBotError::Config(format!("Invalid ping URL: {e}")))?;
    }

    if config.interval_seconds == 0 {
        return Err(SweepBotError::Config(
            "Ping interval must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate health endpoint configuration
fn validate_health_config(config: &super::HealthConfig) -> Result<()> {
    config
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .map_err(|e| SweepBotError::Config(format!("Invalid health bind address: {e}")))?;

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SweepBotError::Config("Log level is required".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings
    }

    #[test]
    fn test_default_settings_with_token_validate() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_token_rejected() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_ping_url_rejected() {
        let mut settings = valid_settings();
        settings.ping.url = Some("not a url".to_string());
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_bind_addr_rejected() {
        let mut settings = valid_settings();
        settings.health.bind_addr = "localhost".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_negative_default_delay_rejected() {
        let mut settings = valid_settings();
        settings.retention.default_delay_seconds = -1;
        assert!(validate_settings(&settings).is_err());
    }
}
