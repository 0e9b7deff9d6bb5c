//! Admin chat listing command handler

use teloxide::{prelude::*, types::Message, Bot};
use tracing::debug;

use crate::database::DatabaseService;
use crate::models::ChatConfig;
use crate::utils::duration::format_delay;
use crate::utils::errors::{Result, SweepBotError};

/// Handle /chats command - list chats the requester administers
pub async fn handle_chats(bot: Bot, msg: Message, db: DatabaseService) -> Result<()> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| SweepBotError::InvalidInput("No user in message".to_string()))?;
    let user_id = user.id.0 as i64;

    if !msg.chat.id.is_user() {
        bot.send_message(msg.chat.id, "Send /chats to me in a private chat.")
            .await?;
        return Ok(());
    }

    let text = render_chat_list(&db.chat_configs.list_admin_chats(user_id).await?);
    debug!(user_id = user_id, "Listed admin chats");

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

pub(crate) fn render_chat_list(configs: &[ChatConfig]) -> String {
    if configs.is_empty() {
        return "No chats found. Add me to a group and I will show up here.".to_string();
    }

    let mut lines = vec!["Your chats:".to_string()];
    for config in configs {
        lines.push(format!("• {}", render_chat_line(config)));
    }
    lines.join("\n")
}

fn render_chat_line(config: &ChatConfig) -> String {
    let name = config
        .title
        .clone()
        .unwrap_or_else(|| config.chat_id.to_string());

    format!(
        "{} — human {}, bot {}, channel {}",
        name,
        format_delay(config.human_delay_seconds),
        format_delay(config.bot_delay_seconds),
        format_delay(config.channel_delay_seconds)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_chat_list() {
        assert!(render_chat_list(&[]).contains("No chats found"));
    }

    #[test]
    fn test_render_chat_list_lines() {
        let mut config = ChatConfig::disabled(-100123);
        config.title = Some("Example Chat".to_string());
        config.human_delay_seconds = 300;

        let text = render_chat_list(&[config]);
        assert!(text.contains("Example Chat"));
        assert!(text.contains("human 5m"));
        assert!(text.contains("bot off"));
    }

    #[test]
    fn test_render_chat_line_falls_back_to_id() {
        let config = ChatConfig::disabled(-100456);
        let text = render_chat_list(&[config]);
        assert!(text.contains("-100456"));
    }
}
