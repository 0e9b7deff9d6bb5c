//! SweepBot Telegram Bot
//!
//! A chat-message retention bot: every message in a monitored chat is
//! scheduled for deletion after a per-chat, per-sender-class delay.
//! This library provides the configuration store, the deletion scheduler,
//! and the Telegram handler surface.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, SweepBotError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::SessionStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
