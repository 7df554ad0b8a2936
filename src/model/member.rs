//! Gateway-independent view of a guild member.

use serenity::all::Member;

/// The parts of a Discord guild member the verification core needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSubject {
    pub discord_id: u64,
    /// Account username (`member.user.name`).
    pub username: String,
    /// Guild nickname, falling back to global name and then username.
    pub display_name: String,
    /// Role ids currently held in the guild.
    pub role_ids: Vec<u64>,
}

impl MemberSubject {
    pub fn from_member(member: &Member) -> Self {
        Self {
            discord_id: member.user.id.get(),
            username: member.user.name.clone(),
            display_name: member.display_name().to_string(),
            role_ids: member.roles.iter().map(|role| role.get()).collect(),
        }
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }
}
