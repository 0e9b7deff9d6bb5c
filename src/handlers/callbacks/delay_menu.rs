//! Inline settings menu for delay configuration
//!
//! Menu flow: settings overview → sender class → preset delay or "custom".
//! The custom step records a `ConfigSession` and the admin's next message is
//! interpreted as the delay value (see `handlers::messages`).

use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId},
    Bot,
};
use tracing::info;

use crate::database::DatabaseService;
use crate::models::{ChatConfig, SenderClass};
use crate::services::ServiceFactory;
use crate::state::{ConfigSession, SessionStore};
use crate::utils::duration::format_delay;
use crate::utils::errors::Result;

/// Preset delays offered for every sender class, in seconds.
const PRESETS: &[(&str, i64)] = &[
    ("Off", 0),
    ("30s", 30),
    ("5m", 300),
    ("1h", 3_600),
    ("1d", 86_400),
    ("1w", 604_800),
];

fn settings_text(config: &ChatConfig) -> String {
    format!(
        "Auto-delete settings\n\n\
         Human messages: {}\n\
         Bot messages: {}\n\
         Channel posts: {}\n\n\
         Pick a sender class to change:",
        format_delay(config.human_delay_seconds),
        format_delay(config.bot_delay_seconds),
        format_delay(config.channel_delay_seconds)
    )
}

fn settings_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Human", "class:human"),
            InlineKeyboardButton::callback("Bot", "class:bot"),
            InlineKeyboardButton::callback("Channel", "class:channel"),
        ],
    ])
}

fn class_keyboard(class: SenderClass) -> InlineKeyboardMarkup {
    let mut preset_row = Vec::new();
    for (label, seconds) in PRESETS {
        preset_row.push(InlineKeyboardButton::callback(
            *label,
            format!("delay:{}:{}", class.as_str(), seconds),
        ));
    }

    InlineKeyboardMarkup::new(vec![
        preset_row,
        vec![
            InlineKeyboardButton::callback("Custom…", format!("custom:{}", class.as_str())),
            InlineKeyboardButton::callback("« Back", "menu:settings"),
        ],
    ])
}

/// Show (or update) the settings overview for a chat.
pub async fn show_settings_menu(
    bot: &Bot,
    chat_id: ChatId,
    existing: Option<MessageId>,
    db: &DatabaseService,
) -> Result<()> {
    let config = db.chat_configs.get_config(chat_id.0).await?;
    let text = settings_text(&config);

    match existing {
        Some(message_id) => {
            bot.edit_message_text(chat_id, message_id, text)
                .reply_markup(settings_keyboard())
                .await?;
        }
        None => {
            bot.send_message(chat_id, text)
                .reply_markup(settings_keyboard())
                .await?;
        }
    }

    Ok(())
}

/// Show the preset keyboard for one sender class.
pub async fn show_class_menu(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    class: SenderClass,
    db: &DatabaseService,
) -> Result<()> {
    let config = db.chat_configs.get_config(chat_id.0).await?;
    let text = format!(
        "Delay for {} messages (currently {}):",
        class.as_str(),
        format_delay(config.delay_for(class))
    );

    bot.edit_message_text(chat_id, message_id, text)
        .reply_markup(class_keyboard(class))
        .await?;

    Ok(())
}

/// Apply a preset delay chosen from the menu.
pub async fn apply_preset(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    class: SenderClass,
    seconds: i64,
    services: &ServiceFactory,
    db: &DatabaseService,
) -> Result<()> {
    services.auth_service.require_configure(chat_id, user_id).await?;
    db.chat_configs.set_delay(chat_id.0, class, seconds).await?;

    info!(chat_id = chat_id.0, user_id = user_id, class = %class,
          delay_seconds = seconds, "Delay updated via menu");

    show_settings_menu(bot, chat_id, Some(message_id), db).await
}

/// Record a config session and prompt the admin for a custom delay value.
pub async fn prompt_custom(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    class: SenderClass,
    services: &ServiceFactory,
    sessions: &SessionStore,
) -> Result<()> {
    services.auth_service.require_configure(chat_id, user_id).await?;

    let session = ConfigSession::new(user_id, chat_id.0, class, sessions.session_ttl());
    sessions.save_session(&session).await?;

    bot.send_message(
        chat_id,
        format!(
            "Send the new delay for {} messages as a number of seconds or a \
             duration code like 10m. 0 turns it off.",
            class.as_str()
        ),
    )
    .await?;

    Ok(())
}
