//! Ready event handler for bot initialization.
//!
//! Fired once per gateway connection after the handshake. Sets the presence and
//! registers the global slash commands.

use serenity::all::{ActivityData, Command, Context, OnlineStatus, Ready};

use crate::{bot::command, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared state, used for the division country shown in the presence
/// - `ctx` - Discord context for setting presence and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_presence(
        Some(ActivityData::watching(format!(
            "IVAO {}",
            state.config.division.country
        ))),
        OnlineStatus::Online,
    );

    match Command::set_global_commands(&ctx.http, command::definitions()).await {
        Ok(commands) => tracing::info!("Registered {} global command(s)", commands.len()),
        Err(e) => tracing::error!("Failed to register global commands: {:?}", e),
    }
}
