use serenity::all::{CommandInteraction, Context};

use crate::{
    bot::{
        authenticate::authenticate_member,
        command::{followup, require_guild},
    },
    state::AppState,
};

/// `/auth`: verifies the invoking member.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    let Some((_, member)) = require_guild(ctx, command).await else {
        return;
    };

    match authenticate_member(state, ctx.http.clone(), member).await {
        Ok(_) => followup(ctx, command, "✅ Authentication successful!").await,
        Err(e) => {
            tracing::info!(
                "/auth failed for {} ({}): code {}: {}",
                member.user.name,
                member.user.id,
                e.code(),
                e
            );
            followup(ctx, command, format!("❌ Authentication failed: {}", e)).await;
        }
    }
}
