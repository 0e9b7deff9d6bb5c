//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

pub mod delay_menu;

use teloxide::{prelude::*, types::CallbackQuery, Bot};
use tracing::{debug, warn};

use crate::database::DatabaseService;
use crate::handlers::commands::chats::render_chat_list;
use crate::services::ServiceFactory;
use crate::state::SessionStore;
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: ServiceFactory,
    db: DatabaseService,
    sessions: SessionStore,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;

    let Some(data) = query.data.clone() else {
        return Ok(());
    };

    // Answer first to clear the client's loading state.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let (chat_id, message_id) = match query.message.as_ref() {
        Some(teloxide::types::MaybeInaccessibleMessage::Regular(m)) => (m.chat.id, m.id),
        Some(teloxide::types::MaybeInaccessibleMessage::Inaccessible(m)) => {
            (m.chat.id, m.message_id)
        }
        None => {
            debug!(user_id = user_id, "Callback without a message, ignoring");
            return Ok(());
        }
    };

    debug!(user_id = user_id, chat_id = chat_id.0, callback_data = %data,
           "Processing callback query");

    let parts: Vec<&str> = data.split(':').collect();
    let result = match parts.as_slice() {
        ["menu", "settings"] => {
            delay_menu::show_settings_menu(&bot, chat_id, Some(message_id), &db).await
        }
        ["menu", "chats"] => {
            let text = render_chat_list(&db.chat_configs.list_admin_chats(user_id).await?);
            bot.edit_message_text(chat_id, message_id, text).await?;
            Ok(())
        }
        ["class", class] => match class.parse() {
            Ok(class) => {
                delay_menu::show_class_menu(&bot, chat_id, message_id, class, &db).await
            }
            Err(e) => Err(e),
        },
        ["delay", class, seconds] => match (class.parse(), seconds.parse::<i64>()) {
            (Ok(class), Ok(seconds)) if seconds >= 0 => {
                delay_menu::apply_preset(
                    &bot, chat_id, message_id, user_id, class, seconds, &services, &db,
                )
                .await
            }
            _ => {
                warn!(callback_data = %data, "Malformed delay callback");
                Ok(())
            }
        },
        ["custom", class] => match class.parse() {
            Ok(class) => {
                delay_menu::prompt_custom(&bot, chat_id, user_id, class, &services, &sessions)
                    .await
            }
            Err(e) => Err(e),
        },
        _ => {
            warn!(callback_data = %data, "Unknown callback action");
            Ok(())
        }
    };

    // User-caused failures become a reply in the chat; the rest propagate.
    if let Err(e) = result {
        match e.user_message() {
            Some(text) => {
                bot.send_message(chat_id, text).await?;
            }
            None => return Err(e),
        }
    }

    Ok(())
}
