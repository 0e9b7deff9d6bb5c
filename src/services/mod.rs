//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod health;
pub mod pinger;
pub mod scheduler;

// Re-export commonly used services
pub use auth::AuthService;
pub use pinger::LivenessPinger;
pub use scheduler::{BotDeleter, DeletionScheduler, MessageDeleter};

use teloxide::Bot;

use crate::config::Settings;
use crate::utils::errors::Result;

/// Scheduler instance used in production.
pub type Scheduler = DeletionScheduler<BotDeleter>;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub scheduler: Scheduler,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: Settings) -> Result<Self> {
        let auth_service = AuthService::new(bot.clone(), settings.clone());
        let scheduler = DeletionScheduler::new(
            BotDeleter::new(bot),
            std::time::Duration::from_secs(settings.retention.delete_timeout_seconds),
        );

        Ok(Self {
            auth_service,
            scheduler,
        })
    }
}
