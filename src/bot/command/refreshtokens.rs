use serenity::all::{CommandInteraction, Context, Mentionable, ResolvedValue};
use serenity::async_trait;

use crate::{
    bot::command::{fetch_member, followup, require_staff, user_option, DEFAULT_DAYS_OLD},
    model::{
        member::MemberSubject,
        refresh::{RefreshProgress, RefreshSelector},
    },
    service::refresh::{RefreshReporter, RefreshService},
    state::AppState,
};

/// Posts progress lines as ephemeral follow-ups.
struct FollowupReporter<'a> {
    ctx: &'a Context,
    command: &'a CommandInteraction,
}

#[async_trait]
impl RefreshReporter for FollowupReporter<'_> {
    async fn progress(&self, progress: RefreshProgress) {
        followup(self.ctx, self.command, progress.to_string()).await;
    }
}

/// `/refreshtokens [member] [days_old] [all_users]`: bulk token rotation.
///
/// `member` takes precedence over `all_users`, which takes precedence over `days_old`.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    let Some((guild_id, caller)) = require_staff(state, ctx, command).await else {
        return;
    };

    let (days_old, all_users) = scalar_options(command);

    let selector = match user_option(command, "member") {
        Some(user) => {
            let Some(target) = fetch_member(ctx, command, guild_id, user).await else {
                return;
            };
            followup(
                ctx,
                command,
                format!("Refreshing token for {}...", target.mention()),
            )
            .await;
            RefreshSelector::Member(MemberSubject::from_member(&target))
        }
        None if all_users => {
            followup(
                ctx,
                command,
                "Refreshing tokens for all users with refresh tokens... This may take a while.",
            )
            .await;
            RefreshSelector::All
        }
        None => {
            followup(
                ctx,
                command,
                format!("Refreshing tokens older than {} days...", days_old),
            )
            .await;
            RefreshSelector::OlderThan(days_old)
        }
    };

    tracing::info!(
        "{} ({}) started token refresh: {:?}",
        caller.user.name,
        caller.user.id,
        selector
    );

    let reporter = FollowupReporter { ctx, command };
    match RefreshService::new(&state.pool, &state.tokens)
        .run(&selector, &reporter)
        .await
    {
        Ok(summary) if summary.total == 0 => {
            followup(ctx, command, "No users found matching the criteria.").await
        }
        Ok(summary) => followup(ctx, command, summary.render()).await,
        Err(e) => {
            tracing::error!("Token refresh aborted: {}", e);
            followup(ctx, command, "❌ Token refresh failed due to an unexpected error.").await;
        }
    }
}

fn scalar_options(command: &CommandInteraction) -> (u32, bool) {
    let mut days_old = DEFAULT_DAYS_OLD;
    let mut all_users = false;

    for option in command.data.options() {
        match (option.name, option.value) {
            ("days_old", ResolvedValue::Integer(days)) => {
                days_old = u32::try_from(days).unwrap_or(DEFAULT_DAYS_OLD);
            }
            ("all_users", ResolvedValue::Boolean(flag)) => all_users = flag,
            _ => {}
        }
    }

    (days_old, all_users)
}
