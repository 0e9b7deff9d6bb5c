//! SweepBot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::{prelude::*, types::Update};
use tracing::{error, info, warn};

use sweepbot::{
    config::Settings,
    database::{connection, DatabaseService},
    handlers::{
        callbacks::handle_callback_query,
        commands::{handle_command, Command},
        messages::{handle_bot_membership_update, handle_message},
    },
    services::{LivenessPinger, ServiceFactory},
    state::SessionStore,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the dispatcher
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting SweepBot...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let db_pool = connection::create_pool(&db_config).await?;
    connection::run_migrations(&db_pool).await?;
    let database_service = DatabaseService::new(db_pool);

    // Initialize session storage
    info!("Connecting to Redis...");
    let session_store = SessionStore::new(settings.redis.clone()).await?;
    session_store.test_connection().await?;

    // Initialize bot and services
    let bot = Bot::new(&settings.bot.token);
    let services = ServiceFactory::new(bot.clone(), settings.clone())?;

    // Background tasks: health endpoint and liveness pinger
    let (_health_addr, _health_handle) =
        sweepbot::services::health::serve(&settings.health.bind_addr).await?;
    let _pinger_handle = LivenessPinger::from_settings(&settings.ping)?.spawn();

    let me = bot.get_me().await?;
    info!(username = me.username(), "Bot started");

    // Wrap dependencies for injection
    let services_arc = Arc::new(services);
    let database_arc = Arc::new(database_service);
    let sessions_arc = Arc::new(session_store);
    let settings_arc = Arc::new(settings);

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![
            services_arc,
            database_arc,
            sessions_arc,
            settings_arc
        ])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("SweepBot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("SweepBot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_channel_post().endpoint(handle_channel_posts))
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
        .branch(Update::filter_my_chat_member().endpoint(handle_chat_member_updates))
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceFactory>,
    db: Arc<DatabaseService>,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let result = handle_command(bot.clone(), msg, cmd, (*services).clone(), (*db).clone()).await;

    if let Err(e) = result {
        // User-caused failures become a direct reply; the rest are logged.
        match e.user_message() {
            Some(text) => {
                if let Err(send_err) = bot.send_message(chat_id, text).await {
                    error!(error = %send_err, "Failed to send error reply");
                }
            }
            None => {
                error!(error = %e, "Error handling command");
                return Err(e.into());
            }
        }
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    db: Arc<DatabaseService>,
    sessions: Arc<SessionStore>,
) -> HandlerResult {
    if let Err(e) = handle_message(
        bot,
        msg,
        (*services).clone(),
        (*db).clone(),
        (*sessions).clone(),
    )
    .await
    {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle channel posts (ingestion only, no command surface)
async fn handle_channel_posts(
    msg: Message,
    services: Arc<ServiceFactory>,
    db: Arc<DatabaseService>,
) -> HandlerResult {
    if let Err(e) = sweepbot::handlers::messages::handle_chat_message(&msg, &services, &db).await {
        error!(error = %e, "Error handling channel post");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    services: Arc<ServiceFactory>,
    db: Arc<DatabaseService>,
    sessions: Arc<SessionStore>,
) -> HandlerResult {
    if let Err(e) = handle_callback_query(
        bot,
        query,
        (*services).clone(),
        (*db).clone(),
        (*sessions).clone(),
    )
    .await
    {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}

/// Handle chat member updates (bot added/removed from chats)
async fn handle_chat_member_updates(
    bot: Bot,
    update: teloxide::types::ChatMemberUpdated,
    services: Arc<ServiceFactory>,
    db: Arc<DatabaseService>,
    settings: Arc<Settings>,
) -> HandlerResult {
    if let Err(e) = handle_bot_membership_update(
        bot,
        update,
        (*services).clone(),
        (*db).clone(),
        (*settings).clone(),
    )
    .await
    {
        error!(error = %e, "Error handling chat member update");
        return Err(e.into());
    }

    Ok(())
}
