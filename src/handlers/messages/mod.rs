//! Message handlers module
//!
//! Ingestion path: classify every inbound chat message, resolve the
//! applicable delay from the chat's config at enqueue time, and hand the
//! message to the deletion scheduler. Also serves the pending custom-delay
//! input flow and bot membership updates.

use teloxide::{
    prelude::*,
    types::{ChatId, ChatMemberKind, ChatMemberUpdated, Message},
    Bot,
};
use tracing::{debug, info, trace, warn};

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::models::SenderClass;
use crate::services::ServiceFactory;
use crate::state::{ConfigSession, SessionStore};
use crate::utils::duration::format_delay;
use crate::utils::errors::Result;

/// Classify a message's author and return the sender id when resolvable.
///
/// Channel posts (including anonymous posts attributed to the chat itself)
/// carry `sender_chat`; everything else is a user account, split into bot
/// and human. A message with no resolvable sender at all counts as human.
pub fn classify_sender(msg: &Message) -> (SenderClass, Option<i64>) {
    if let Some(sender_chat) = &msg.sender_chat {
        return (SenderClass::Channel, Some(sender_chat.id.0));
    }

    match &msg.from {
        Some(user) if user.is_bot => (SenderClass::Bot, Some(user.id.0 as i64)),
        Some(user) => (SenderClass::Human, Some(user.id.0 as i64)),
        None => (SenderClass::Human, None),
    }
}

/// Handle incoming messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    db: DatabaseService,
    sessions: SessionStore,
) -> Result<()> {
    // A pending config session claims the admin's next message as the custom
    // delay value.
    if let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) {
        let user_id = user.id.0 as i64;
        if let Some(session) = sessions.load_session(user_id).await? {
            if msg.chat.id.is_user() || msg.chat.id.0 == session.chat_id {
                return handle_custom_delay_input(
                    bot, &msg, session, text, &services, &db, &sessions,
                )
                .await;
            }
        }
    }

    if msg.chat.id.is_user() {
        // Private chats are never swept; only nudge on plain text.
        if msg.text().is_some() {
            bot.send_message(
                msg.chat.id,
                "I only delete messages in groups and channels. See /help.",
            )
            .await?;
        }
        return Ok(());
    }

    handle_chat_message(&msg, &services, &db).await
}

/// Ingest one group/channel message: classify, resolve delay, schedule.
pub async fn handle_chat_message(
    msg: &Message,
    services: &ServiceFactory,
    db: &DatabaseService,
) -> Result<()> {
    let chat_id = msg.chat.id.0;
    let (class, sender_id) = classify_sender(msg);

    // Delay is resolved once, here; later settings changes do not touch
    // deletions that are already scheduled.
    let config = db.chat_configs.get_config(chat_id).await?;

    if let Some(sender_id) = sender_id {
        if config.is_excluded(sender_id) {
            trace!(chat_id = chat_id, sender_id = sender_id, "Sender excluded, skipping");
            return Ok(());
        }
    }

    let delay = config.delay_for(class);
    if delay > 0 {
        services.scheduler.schedule(chat_id, msg.id.0, delay);
    }

    Ok(())
}

/// Apply a custom delay value typed after the menu's "Custom…" step.
async fn handle_custom_delay_input(
    bot: Bot,
    msg: &Message,
    session: ConfigSession,
    text: &str,
    services: &ServiceFactory,
    db: &DatabaseService,
    sessions: &SessionStore,
) -> Result<()> {
    use crate::handlers::commands::delay::parse_delay_value;

    let user_id = session.user_id;
    let target_chat = ChatId(session.chat_id);

    let seconds = match parse_delay_value(text) {
        Ok(seconds) => seconds,
        Err(e) => {
            // Bad value keeps the session alive for another try.
            if let Some(reply) = e.user_message() {
                bot.send_message(msg.chat.id, reply).await?;
            }
            return Ok(());
        }
    };

    sessions.delete_session(user_id).await?;

    if let Err(e) = services.auth_service.require_configure(target_chat, user_id).await {
        if let Some(reply) = e.user_message() {
            bot.send_message(msg.chat.id, reply).await?;
            return Ok(());
        }
        return Err(e);
    }

    db.chat_configs
        .set_delay(session.chat_id, session.sender_class, seconds)
        .await?;

    info!(chat_id = session.chat_id, user_id = user_id,
          class = %session.sender_class, delay_seconds = seconds,
          "Custom delay applied");

    let reply = if seconds > 0 {
        format!(
            "Done. {} messages will be deleted after {}.",
            session.sender_class.as_str(),
            format_delay(seconds)
        )
    } else {
        format!(
            "Done. Auto-deletion of {} messages is off.",
            session.sender_class.as_str()
        )
    };
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}

/// Handle bot membership updates (bot added to / removed from a chat).
pub async fn handle_bot_membership_update(
    bot: Bot,
    update: ChatMemberUpdated,
    services: ServiceFactory,
    db: DatabaseService,
    settings: Settings,
) -> Result<()> {
    let me = bot.get_me().await?;
    if update.new_chat_member.user.id != me.id {
        return Ok(());
    }

    let chat_id = update.chat.id;
    if chat_id.is_user() {
        return Ok(());
    }

    let removed = matches!(
        update.new_chat_member.kind,
        ChatMemberKind::Left | ChatMemberKind::Banned(_)
    );

    if removed {
        db.chat_configs.set_active(chat_id.0, false).await?;
        info!(chat_id = chat_id.0, "Bot removed from chat, config deactivated");
        return Ok(());
    }

    let administrator_ids = match services.auth_service.chat_administrator_ids(chat_id).await {
        Ok(ids) => ids,
        Err(e) => {
            debug!(chat_id = chat_id.0, error = %e, "Could not fetch chat administrators");
            Vec::new()
        }
    };

    let title = update.chat.title().map(|t| t.to_string());
    db.chat_configs
        .ensure_chat(
            chat_id.0,
            title,
            administrator_ids,
            settings.retention.default_delay_seconds,
        )
        .await?;

    info!(chat_id = chat_id.0, "Bot added to chat, config ensured");

    match services.auth_service.bot_can_delete(chat_id).await {
        Ok(false) => {
            bot.send_message(
                chat_id,
                "I need the delete-messages permission in this chat to work.",
            )
            .await?;
        }
        Ok(true) => {}
        Err(e) => {
            warn!(chat_id = chat_id.0, error = %e, "Could not check bot permissions");
        }
    }

    Ok(())
}
