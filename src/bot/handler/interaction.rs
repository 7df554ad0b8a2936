use serenity::all::{Context, Interaction};

use crate::{bot::command, state::AppState};

/// Handles the interaction_create event, dispatching slash commands
pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    tracing::debug!(
        "Command /{} invoked by {} ({})",
        command.data.name,
        command.user.name,
        command.user.id
    );

    command::dispatch(state, &ctx, &command).await;
}
