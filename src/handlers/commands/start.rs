//! Start command handler

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, Message},
    Bot,
};
use tracing::debug;

use crate::utils::errors::Result;

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id;

    if !chat_id.is_user() {
        bot.send_message(
            chat_id,
            "SweepBot is watching this chat. Use /settings to configure auto-deletion.",
        )
        .await?;
        return Ok(());
    }

    let me = bot.get_me().await?;
    let add_url = url::Url::parse(&format!(
        "https://t.me/{}?startgroup=true",
        me.username()
    ))?;

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::url("➕ Add me to a group", add_url)],
        vec![InlineKeyboardButton::callback("My chats", "menu:chats")],
    ]);

    debug!(user_id = ?msg.from.as_ref().map(|u| u.id), "Sent welcome message");

    bot.send_message(
        chat_id,
        "Welcome to SweepBot.\n\n\
         I delete messages in your groups after a configurable delay, with \
         separate delays for human, bot and channel senders.\n\n\
         Add me to a group, grant me the delete-messages right, and run \
         /settings there.",
    )
    .reply_markup(keyboard)
    .await?;

    Ok(())
}
