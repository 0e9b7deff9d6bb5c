//! Authorization service implementation
//!
//! Configuration commands are gated on chat role: the acting user must be
//! the chat owner, an administrator holding the delete-messages right, or a
//! globally configured bot admin.

use teloxide::types::{ChatId, ChatMemberKind, UserId};
use teloxide::{prelude::Request, requests::Requester, Bot};
use tracing::debug;

use crate::config::Settings;
use crate::utils::errors::{Result, SweepBotError};

#[derive(Clone)]
pub struct AuthService {
    bot: Bot,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(bot: Bot, settings: Settings) -> Self {
        Self { bot, settings }
    }

    /// Check if user is a configured bot admin
    pub fn is_bot_admin(&self, user_id: i64) -> bool {
        self.settings.bot.admin_ids.contains(&user_id)
    }

    /// Whether a chat member role is allowed to change retention settings.
    pub fn member_can_configure(kind: &ChatMemberKind) -> bool {
        match kind {
            ChatMemberKind::Owner(_) => true,
            ChatMemberKind::Administrator(admin) => admin.can_delete_messages,
            _ => false,
        }
    }

    /// Check whether the user may configure the chat's retention settings.
    pub async fn can_configure(&self, chat_id: ChatId, user_id: i64) -> Result<bool> {
        if self.is_bot_admin(user_id) {
            return Ok(true);
        }

        match self
            .bot
            .get_chat_member(chat_id, UserId(user_id as u64))
            .send()
            .await
        {
            Ok(member) => Ok(Self::member_can_configure(&member.kind)),
            Err(e) => {
                // Unresolvable membership is treated as no permission.
                debug!(user_id = user_id, chat_id = ?chat_id, error = %e,
                       "Could not get chat member status");
                Ok(false)
            }
        }
    }

    /// Require configure permission or return `PermissionDenied`.
    pub async fn require_configure(&self, chat_id: ChatId, user_id: i64) -> Result<()> {
        if self.can_configure(chat_id, user_id).await? {
            return Ok(());
        }

        Err(SweepBotError::PermissionDenied(
            "you need to be a chat admin with the delete-messages right".to_string(),
        ))
    }

    /// Current administrator ids of a chat, owner included.
    pub async fn chat_administrator_ids(&self, chat_id: ChatId) -> Result<Vec<i64>> {
        let admins = self.bot.get_chat_administrators(chat_id).send().await?;
        Ok(admins.iter().map(|m| m.user.id.0 as i64).collect())
    }

    /// Whether the bot itself holds the delete-messages right in a chat.
    pub async fn bot_can_delete(&self, chat_id: ChatId) -> Result<bool> {
        let me = self.bot.get_me().send().await?;
        let member = self.bot.get_chat_member(chat_id, me.id).send().await?;
        Ok(Self::member_can_configure(&member.kind))
    }
}
