//! Slash commands.
//!
//! Every command defers with an ephemeral response first and always answers through
//! a follow-up, whether it succeeds or fails.

pub mod auth;
pub mod refreshtokens;
pub mod staffauth;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateInteractionResponseFollowup, GuildId, Member, ResolvedValue, User,
};

use crate::state::AppState;

pub(crate) const GUILD_ONLY: &str = "This command can only be used in a server.";
pub(crate) const NOT_PERMITTED: &str = "❌ You don't have permission to use this command.";

/// Days used by `refreshtokens` when `days_old` is omitted.
pub const DEFAULT_DAYS_OLD: u32 = 10;

/// Global command definitions registered on ready.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("auth").description("Authenticate with your IVAO account"),
        CreateCommand::new("staffauth")
            .description("Authenticate another member (staff only)")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Member to authenticate")
                    .required(true),
            ),
        CreateCommand::new("refreshtokens")
            .description("Refresh stored IVAO tokens (staff only)")
            .add_option(CreateCommandOption::new(
                CommandOptionType::User,
                "member",
                "Refresh the token of a single member",
            ))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "days_old",
                    "Refresh tokens last rotated more than this many days ago (default 10)",
                )
                .min_int_value(0),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "all_users",
                "Refresh every stored token",
            )),
    ]
}

/// Routes a command interaction to its implementation.
pub async fn dispatch(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer /{}: {:?}", command.data.name, e);
        return;
    }

    match command.data.name.as_str() {
        "auth" => auth::run(state, ctx, command).await,
        "staffauth" => staffauth::run(state, ctx, command).await,
        "refreshtokens" => refreshtokens::run(state, ctx, command).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            followup(ctx, command, "Unknown command.").await;
        }
    }
}

/// Sends an ephemeral follow-up, logging delivery failures.
pub(crate) async fn followup(ctx: &Context, command: &CommandInteraction, content: impl Into<String>) {
    let message = CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true);

    if let Err(e) = command.create_followup(&ctx.http, message).await {
        tracing::error!("Failed to send follow-up for /{}: {:?}", command.data.name, e);
    }
}

/// Guild and invoking member for a guild-only command.
///
/// Answers the invoker and returns `None` when the command was used outside a guild.
pub(crate) async fn require_guild<'a>(
    ctx: &Context,
    command: &'a CommandInteraction,
) -> Option<(GuildId, &'a Member)> {
    match (command.guild_id, command.member.as_deref()) {
        (Some(guild_id), Some(member)) => Some((guild_id, member)),
        _ => {
            followup(ctx, command, GUILD_ONLY).await;
            None
        }
    }
}

/// Whether `member` holds the division staff role.
pub(crate) fn is_staff(state: &AppState, member: &Member) -> bool {
    member
        .roles
        .iter()
        .any(|role| role.get() == state.config.division.roles.staff)
}

/// Guild and caller of a staff-only command.
///
/// Answers the invoker and returns `None` outside a guild or when the caller lacks the
/// staff role.
pub(crate) async fn require_staff<'a>(
    state: &AppState,
    ctx: &Context,
    command: &'a CommandInteraction,
) -> Option<(GuildId, &'a Member)> {
    let (guild_id, caller) = require_guild(ctx, command).await?;

    if !is_staff(state, caller) {
        tracing::info!(
            "Denied /{} to {} ({}): missing staff role",
            command.data.name,
            caller.user.name,
            caller.user.id
        );
        followup(ctx, command, NOT_PERMITTED).await;
        return None;
    }

    Some((guild_id, caller))
}

/// User passed to the option `name`, if any.
pub(crate) fn user_option<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a User> {
    command
        .data
        .options()
        .into_iter()
        .find(|option| option.name == name)
        .and_then(|option| match option.value {
            ResolvedValue::User(user, _) => Some(user),
            _ => None,
        })
}

/// Fetches the full guild member for `user`, answering the invoker on failure.
pub(crate) async fn fetch_member(
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: GuildId,
    user: &User,
) -> Option<Member> {
    match guild_id.member(&ctx.http, user.id).await {
        Ok(member) => Some(member),
        Err(e) => {
            tracing::warn!("Failed to fetch member {} in guild {}: {:?}", user.id, guild_id, e);
            followup(ctx, command, format!("❌ Could not find {} in this server.", user)).await;
            None
        }
    }
}
