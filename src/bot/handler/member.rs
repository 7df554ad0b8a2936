use serenity::all::{Context, Member};

use crate::{bot::authenticate::authenticate_member, state::AppState};

/// Handles the guild_member_addition event by verifying the new member
///
/// Failures are logged with their numeric code; the member is left untouched.
pub async fn handle_guild_member_addition(state: &AppState, ctx: Context, new_member: Member) {
    tracing::info!(
        "Member {} ({}) joined guild {}",
        new_member.user.name,
        new_member.user.id,
        new_member.guild_id
    );

    match authenticate_member(state, ctx.http.clone(), &new_member).await {
        Ok((verification, _)) => tracing::info!(
            "Automatically authenticated {} by {}",
            new_member.user.name,
            verification.method
        ),
        Err(e) => tracing::warn!(
            "Automatic authentication failed for {} ({}): code {}: {}",
            new_member.user.name,
            new_member.user.id,
            e.code(),
            e
        ),
    }
}
