//! Delay configuration command handlers

use teloxide::{
    prelude::*,
    types::{ChatId, Message},
    Bot,
};
use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::handlers::callbacks::delay_menu;
use crate::models::SenderClass;
use crate::services::ServiceFactory;
use crate::utils::duration::{format_delay, parse_duration};
use crate::utils::errors::{Result, SweepBotError};

const SETDELAY_USAGE: &str =
    "usage: /setdelay [human|bot|channel] <seconds or duration code>, e.g. /setdelay 300 or /setdelay bot 10m";
const EXCLUDE_USAGE: &str = "usage: /exclude <sender id>";
const INCLUDE_USAGE: &str = "usage: /include <sender id>";

/// Parse /setdelay arguments into a sender class and a delay in seconds.
/// The class defaults to human when omitted.
pub(crate) fn parse_delay_args(args: &str) -> Result<(SenderClass, i64)> {
    let tokens: Vec<&str> = args.split_whitespace().collect();

    let (class, value) = match tokens.as_slice() {
        [value] => (SenderClass::Human, *value),
        [class, value] => (
            class
                .parse()
                .map_err(|_| SweepBotError::InvalidInput(SETDELAY_USAGE.to_string()))?,
            *value,
        ),
        _ => return Err(SweepBotError::InvalidInput(SETDELAY_USAGE.to_string())),
    };

    Ok((class, parse_delay_value(value)?))
}

/// A delay value is either a raw non-negative integer of seconds or a
/// duration code. 0 turns auto-deletion off.
pub(crate) fn parse_delay_value(value: &str) -> Result<i64> {
    let value = value.trim();
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value
            .parse()
            .map_err(|_| SweepBotError::InvalidDuration(format!("'{value}' is too large")));
    }

    parse_duration(value)
}

/// Parse a sender reference: a raw id or a tg://user?id= mention.
pub(crate) fn parse_sender_ref(text: &str, usage: &str) -> Result<i64> {
    let text = text.trim();
    let id_str = text.strip_prefix("tg://user?id=").unwrap_or(text);

    id_str
        .parse()
        .map_err(|_| SweepBotError::InvalidInput(usage.to_string()))
}

fn group_only(msg: &Message) -> Result<(i64, ChatId)> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| SweepBotError::InvalidInput("No user in message".to_string()))?;

    if msg.chat.id.is_user() {
        return Err(SweepBotError::InvalidInput(
            "This command only works inside a group or channel.".to_string(),
        ));
    }

    Ok((user.id.0 as i64, msg.chat.id))
}

/// Handle /setdelay command
pub async fn handle_set_delay(
    bot: Bot,
    msg: Message,
    args: String,
    services: ServiceFactory,
    db: DatabaseService,
) -> Result<()> {
    let (user_id, chat_id) = group_only(&msg)?;

    services.auth_service.require_configure(chat_id, user_id).await?;
    let (class, seconds) = parse_delay_args(&args)?;

    db.chat_configs.set_delay(chat_id.0, class, seconds).await?;
    refresh_metadata(&services, &db, &msg).await;

    info!(chat_id = chat_id.0, user_id = user_id, class = %class,
          delay_seconds = seconds, "Delay updated");

    let reply = if seconds > 0 {
        format!(
            "{} messages will be deleted after {}.",
            class_label(class),
            format_delay(seconds)
        )
    } else {
        format!("Auto-deletion of {} messages is off.", class.as_str())
    };
    bot.send_message(chat_id, reply).await?;

    Ok(())
}

/// Handle /reset command
pub async fn handle_reset(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    db: DatabaseService,
) -> Result<()> {
    let (user_id, chat_id) = group_only(&msg)?;

    services.auth_service.require_configure(chat_id, user_id).await?;
    db.chat_configs.reset(chat_id.0).await?;

    info!(chat_id = chat_id.0, user_id = user_id, "Delays reset");
    bot.send_message(chat_id, "Auto-deletion is now off for this chat.")
        .await?;

    Ok(())
}

/// Handle /settings command - show the interactive menu
pub async fn handle_settings(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    db: DatabaseService,
) -> Result<()> {
    let (user_id, chat_id) = group_only(&msg)?;

    services.auth_service.require_configure(chat_id, user_id).await?;
    refresh_metadata(&services, &db, &msg).await;
    delay_menu::show_settings_menu(&bot, chat_id, None, &db).await
}

/// Handle /exclude and /include commands
pub async fn handle_exclusion(
    bot: Bot,
    msg: Message,
    args: String,
    services: ServiceFactory,
    db: DatabaseService,
    exclude: bool,
) -> Result<()> {
    let (user_id, chat_id) = group_only(&msg)?;

    services.auth_service.require_configure(chat_id, user_id).await?;
    let usage = if exclude { EXCLUDE_USAGE } else { INCLUDE_USAGE };
    let sender_id = parse_sender_ref(&args, usage)?;

    let reply = if exclude {
        db.chat_configs
            .add_excluded_sender(chat_id.0, sender_id)
            .await?;
        format!("Sender {sender_id} is now exempt from auto-deletion.")
    } else {
        db.chat_configs
            .remove_excluded_sender(chat_id.0, sender_id)
            .await?;
        format!("Sender {sender_id} is no longer exempt.")
    };

    info!(chat_id = chat_id.0, user_id = user_id, sender_id = sender_id,
          excluded = exclude, "Exclusion list updated");
    bot.send_message(chat_id, reply).await?;

    Ok(())
}

fn class_label(class: SenderClass) -> &'static str {
    match class {
        SenderClass::Human => "Human",
        SenderClass::Bot => "Bot",
        SenderClass::Channel => "Channel",
    }
}

/// Opportunistically refresh a chat's denormalized title and admin list.
/// Best-effort: failures only get logged.
pub(crate) async fn refresh_metadata(
    services: &ServiceFactory,
    db: &DatabaseService,
    msg: &Message,
) {
    let chat_id = msg.chat.id;
    match services.auth_service.chat_administrator_ids(chat_id).await {
        Ok(admins) => {
            let title = msg.chat.title().map(|t| t.to_string());
            if let Err(e) = db.chat_configs.ensure_chat(chat_id.0, title, admins, 0).await {
                debug!(chat_id = chat_id.0, error = %e, "Metadata refresh failed");
            }
        }
        Err(e) => {
            debug!(chat_id = chat_id.0, error = %e, "Could not fetch chat administrators");
        }
    }
}
