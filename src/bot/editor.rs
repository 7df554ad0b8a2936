use std::sync::Arc;

use serenity::{
    all::{EditMember, GuildId, RoleId, UserId},
    async_trait,
    http::Http,
};

use crate::{error::member::MemberEditError, service::role::MemberEditor};

/// Edits one guild member through the Discord REST API.
pub struct SerenityMemberEditor {
    http: Arc<Http>,
    guild_id: GuildId,
    user_id: UserId,
}

impl SerenityMemberEditor {
    pub fn new(http: Arc<Http>, guild_id: GuildId, user_id: UserId) -> Self {
        Self {
            http,
            guild_id,
            user_id,
        }
    }
}

#[async_trait]
impl MemberEditor for SerenityMemberEditor {
    async fn add_role(&self, role_id: u64, reason: &str) -> Result<(), MemberEditError> {
        self.http
            .add_member_role(self.guild_id, self.user_id, RoleId::new(role_id), Some(reason))
            .await?;

        Ok(())
    }

    async fn set_nickname(&self, nickname: &str) -> Result<(), MemberEditError> {
        self.guild_id
            .edit_member(&self.http, self.user_id, EditMember::new().nickname(nickname))
            .await?;

        Ok(())
    }
}
