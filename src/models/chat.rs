//! Chat retention configuration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::SweepBotError;

/// Classification of a message's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderClass {
    /// A regular user account.
    Human,
    /// An account flagged as a bot by Telegram.
    Bot,
    /// A channel posting into the chat (`sender_chat`), including anonymous
    /// posts attributed to the chat itself.
    Channel,
}

impl SenderClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderClass::Human => "human",
            SenderClass::Bot => "bot",
            SenderClass::Channel => "channel",
        }
    }
}

impl std::str::FromStr for SenderClass {
    type Err = SweepBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" | "user" => Ok(SenderClass::Human),
            "bot" => Ok(SenderClass::Bot),
            "channel" => Ok(SenderClass::Channel),
            other => Err(SweepBotError::InvalidInput(format!(
                "unknown sender class '{other}', expected human, bot or channel"
            ))),
        }
    }
}

impl std::fmt::Display for SenderClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-chat retention configuration, one row per monitored chat.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatConfig {
    pub chat_id: i64,
    pub title: Option<String>,
    pub human_delay_seconds: i64,
    pub bot_delay_seconds: i64,
    pub channel_delay_seconds: i64,
    pub excluded_sender_ids: Vec<i64>,
    pub administrator_ids: Vec<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatConfig {
    /// Zero-value config for a chat with no stored row: all delays off,
    /// nothing excluded.
    pub fn disabled(chat_id: i64) -> Self {
        let now = Utc::now();
        Self {
            chat_id,
            title: None,
            human_delay_seconds: 0,
            bot_delay_seconds: 0,
            channel_delay_seconds: 0,
            excluded_sender_ids: Vec::new(),
            administrator_ids: Vec::new(),
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Delay applicable to a sender class. 0 means never delete.
    pub fn delay_for(&self, class: SenderClass) -> i64 {
        match class {
            SenderClass::Human => self.human_delay_seconds,
            SenderClass::Bot => self.bot_delay_seconds,
            SenderClass::Channel => self.channel_delay_seconds,
        }
    }

    pub fn is_excluded(&self, sender_id: i64) -> bool {
        self.excluded_sender_ids.contains(&sender_id)
    }

    pub fn is_administrator(&self, user_id: i64) -> bool {
        self.administrator_ids.contains(&user_id)
    }
}
