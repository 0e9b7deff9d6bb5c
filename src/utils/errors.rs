//! Error handling for SweepBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for SweepBot application
#[derive(Error, Debug)]
pub enum SweepBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for SweepBot operations
pub type Result<T> = std::result::Result<T, SweepBotError>;

impl SweepBotError {
    /// Text to send back to the user when a command failed because of their
    /// input or their role. Infrastructure errors return `None` and are only
    /// logged.
    pub fn user_message(&self) -> Option<String> {
        match self {
            SweepBotError::PermissionDenied(msg) => Some(format!("Permission denied: {msg}")),
            SweepBotError::InvalidDuration(msg) => Some(format!(
                "Invalid duration: {msg}. Use a number of seconds or a code like 30s, 10m, 2h, 1d, 1w, 1M, 1y."
            )),
            SweepBotError::InvalidInput(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SweepBotError::Database(_) => false,
            SweepBotError::Migration(_) => false,
            SweepBotError::Config(_) => false,
            SweepBotError::Serialization(_) => false,
            SweepBotError::UrlParse(_) => false,
            SweepBotError::AddrParse(_) => false,
            SweepBotError::Telegram(_) => true,
            SweepBotError::Redis(_) => true,
            SweepBotError::Http(_) => true,
            SweepBotError::Io(_) => true,
            SweepBotError::PermissionDenied(_) => false,
            SweepBotError::InvalidDuration(_) => false,
            SweepBotError::InvalidInput(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_user_errors() {
        let err = SweepBotError::PermissionDenied("not a chat admin".to_string());
        assert!(err.user_message().unwrap().contains("not a chat admin"));

        let err = SweepBotError::InvalidDuration("bad code '5x'".to_string());
        assert!(err.user_message().unwrap().contains("5x"));

        let err = SweepBotError::InvalidInput("usage: /exclude <sender id>".to_string());
        assert_eq!(err.user_message().unwrap(), "usage: /exclude <sender id>");
    }

    #[test]
    fn test_no_user_message_for_infrastructure_errors() {
        let err = SweepBotError::Config("missing token".to_string());
        assert!(err.user_message().is_none());
    }
}
