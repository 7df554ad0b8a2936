use sea_orm::entity::prelude::*;

/// Identity record binding a Discord account to an IVAO VID.
///
/// Rows are provisioned by the web enrollment flow; the bot only reads them and
/// updates the Discord binding, cached names, verification flag and refresh token.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub vid: Option<String>,
    pub discord_user_id: Option<String>,
    pub discord_username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub refresh_token: Option<String>,
    pub refresh_token_date: Option<DateTimeUtc>,
    pub verified: bool,
    pub is_banned: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
