use std::sync::Arc;

use serenity::{
    all::{Client, GatewayIntents},
    gateway::ShardManager,
};

use crate::{bot::handler::Handler, error::AppError, state::AppState};

/// Builds the Discord client.
///
/// Returns the client together with its shard manager so the caller can shut the
/// gateway down on exit while the client runs in its own task.
///
/// # Arguments
/// - `state` - Shared application state handed to the event handler
///
/// # Returns
/// - `Ok((Client, Arc<ShardManager>))` - Client ready to be started
/// - `Err(AppError)` - Invalid token or client construction failure
pub async fn init_bot(state: AppState) -> Result<(Client, Arc<ShardManager>), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let token = state.config.discord_token.clone();
    let client = Client::builder(&token, intents)
        .event_handler(Handler::new(state))
        .await?;
    let shard_manager = client.shard_manager.clone();

    Ok((client, shard_manager))
}

/// Starts the Discord bot, blocking until the gateway shuts down.
///
/// Should be called from within a tokio::spawn task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
