use serenity::all::{CommandInteraction, Context, Mentionable};

use crate::{
    bot::{
        authenticate::authenticate_member,
        command::{fetch_member, followup, require_staff, user_option},
    },
    state::AppState,
};

/// `/staffauth <member>`: verifies another member on their behalf.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    let Some((guild_id, caller)) = require_staff(state, ctx, command).await else {
        return;
    };

    let Some(user) = user_option(command, "member") else {
        followup(ctx, command, "❌ Please specify a member.").await;
        return;
    };
    let Some(target) = fetch_member(ctx, command, guild_id, user).await else {
        return;
    };

    tracing::info!(
        "{} ({}) requested authentication of {} ({})",
        caller.user.name,
        caller.user.id,
        target.user.name,
        target.user.id
    );

    let mention = target.mention();
    match authenticate_member(state, ctx.http.clone(), &target).await {
        Ok(_) => followup(ctx, command, format!("✅ Successfully authenticated {}", mention)).await,
        Err(e) => {
            followup(
                ctx,
                command,
                format!("❌ Failed to authenticate {}: {}", mention, e),
            )
            .await
        }
    }
}
