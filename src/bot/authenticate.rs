//! Verification followed by role and nickname assignment.
//!
//! Shared by the member-join handler and the `auth`/`staffauth` commands.

use std::sync::Arc;

use serenity::{all::Member, http::Http};

use crate::{
    bot::editor::SerenityMemberEditor,
    error::verification::VerificationError,
    model::{member::MemberSubject, role::MutationReport},
    service::{
        role::{apply_assignment, RoleAssignor},
        verification::{Verification, VerificationService},
    },
    state::AppState,
};

/// Verifies `member` and applies the resulting roles and nickname.
///
/// Permission failures on individual edits are logged and reported in the returned
/// `MutationReport`; they do not fail the verification.
pub async fn authenticate_member(
    state: &AppState,
    http: Arc<Http>,
    member: &Member,
) -> Result<(Verification, MutationReport), VerificationError> {
    let subject = MemberSubject::from_member(member);

    let verification = VerificationService::new(&state.pool, &state.tokens)
        .verify(&subject)
        .await?;

    let assignment = RoleAssignor::new(&state.config.division).assign(&verification.profile, &subject);
    let editor = SerenityMemberEditor::new(http, member.guild_id, member.user.id);
    let report = apply_assignment(&editor, &assignment).await;

    tracing::info!(
        "Authenticated {} ({}) as VID {}: {} edit(s) applied, {} denied, {} failed",
        subject.username,
        subject.discord_id,
        verification.profile.vid,
        report.applied(),
        report.denied(),
        report.failed()
    );

    Ok((verification, report))
}
