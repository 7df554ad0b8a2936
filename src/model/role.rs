//! Role assignment result and mutation outcomes.

use crate::error::member::MemberEditError;

/// Roles and nickname a verified member should end up with.
///
/// Additive only: `roles_to_add` never contains a role the member already holds and
/// nothing is ever removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Role ids to grant, in grant order, without duplicates.
    pub roles_to_add: Vec<u64>,
    /// Nickname to set, at most 32 characters.
    pub nickname: String,
}

/// A single edit applied to a guild member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberMutation {
    AddRole(u64),
    SetNickname(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    PermissionDenied,
    Failed(String),
}

impl From<Result<(), MemberEditError>> for MutationOutcome {
    fn from(result: Result<(), MemberEditError>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(MemberEditError::PermissionDenied) => Self::PermissionDenied,
            Err(MemberEditError::Failed(message)) => Self::Failed(message),
        }
    }
}

/// Outcome of every mutation attempted for one assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationReport {
    pub entries: Vec<(MemberMutation, MutationOutcome)>,
}

impl MutationReport {
    pub fn push(&mut self, mutation: MemberMutation, outcome: MutationOutcome) {
        self.entries.push((mutation, outcome));
    }

    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, MutationOutcome::Applied))
    }

    pub fn denied(&self) -> usize {
        self.count(|o| matches!(o, MutationOutcome::PermissionDenied))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, MutationOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&MutationOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }
}
