//! Command handlers module
//!
//! This module contains handlers for all bot commands like /setdelay,
//! /settings, /reset, etc.

pub mod chats;
pub mod delay;
pub mod help;
pub mod start;

use teloxide::{types::Message, utils::command::BotCommands, Bot};

use crate::database::DatabaseService;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "SweepBot commands:")]
pub enum Command {
    #[command(description = "Start the bot and show the welcome menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Show this chat's auto-delete settings menu")]
    Settings,
    #[command(description = "Set the auto-delete delay, e.g. /setdelay 300 or /setdelay bot 10m")]
    SetDelay(String),
    #[command(description = "Turn auto-deletion off for this chat")]
    Reset,
    #[command(description = "Exempt a sender from auto-deletion")]
    Exclude(String),
    #[command(description = "Lift a sender's exemption")]
    Include(String),
    #[command(description = "List chats you administer")]
    Chats,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: ServiceFactory,
    db: DatabaseService,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Settings => delay::handle_settings(bot, msg, services, db).await,
        Command::SetDelay(args) => delay::handle_set_delay(bot, msg, args, services, db).await,
        Command::Reset => delay::handle_reset(bot, msg, services, db).await,
        Command::Exclude(args) => {
            delay::handle_exclusion(bot, msg, args, services, db, true).await
        }
        Command::Include(args) => {
            delay::handle_exclusion(bot, msg, args, services, db, false).await
        }
        Command::Chats => chats::handle_chats(bot, msg, db).await,
    }
}
