//! Help command handler

use teloxide::{prelude::*, types::Message, Bot};

use crate::utils::errors::Result;

const HELP_TEXT: &str = "SweepBot commands:\n\n\
/settings — interactive auto-delete settings menu (group only)\n\
/setdelay [human|bot|channel] <value> — set a delay, e.g. /setdelay 300 or /setdelay bot 10m\n\
/reset — turn auto-deletion off for this chat\n\
/exclude <sender id> — exempt a sender from auto-deletion\n\
/include <sender id> — lift a sender's exemption\n\
/chats — list chats you administer (private chat)\n\
/help — this message\n\n\
Delay values are a number of seconds or a duration code: \
s (seconds), m (minutes), h (hours), d (days), w (weeks), M (months), y (years). \
A delay of 0 disables deletion for that sender class.";

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}
