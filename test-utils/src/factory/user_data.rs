//! Identity record factory.
//!
//! Defaults describe a verified member holding a refresh token. Every column can be
//! overridden through the builder, including clearing optional columns.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating identity records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user_data::UserDataFactory;
///
/// let record = UserDataFactory::new(&db)
///     .discord_id(Some("123456789"))
///     .vid("654321")
///     .refresh_token(None::<String>)
///     .build()
///     .await?;
/// ```
pub struct UserDataFactory<'a> {
    db: &'a DatabaseConnection,
    vid: Option<String>,
    discord_user_id: Option<String>,
    discord_username: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
    refresh_token: Option<String>,
    refresh_token_date: Option<DateTime<Utc>>,
    verified: bool,
    is_banned: bool,
}

impl<'a> UserDataFactory<'a> {
    /// Creates a new UserDataFactory with default values.
    ///
    /// Defaults:
    /// - vid: `"{100000 + id}"`
    /// - discord_user_id: `"{900000000000000000 + id}"`
    /// - discord_username: `"member{id}"`
    /// - firstname / lastname: `"First{id}"` / `"Last{id}"`
    /// - refresh_token: `"refresh-{id}"`, dated now
    /// - verified: `true`, is_banned: `false`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            vid: Some((100_000 + id).to_string()),
            discord_user_id: Some((900_000_000_000_000_000u64 + id).to_string()),
            discord_username: Some(format!("member{}", id)),
            firstname: Some(format!("First{}", id)),
            lastname: Some(format!("Last{}", id)),
            refresh_token: Some(format!("refresh-{}", id)),
            refresh_token_date: Some(Utc::now()),
            verified: true,
            is_banned: false,
        }
    }

    /// Sets the VID.
    pub fn vid(mut self, vid: impl Into<String>) -> Self {
        self.vid = Some(vid.into());
        self
    }

    /// Clears the VID column.
    pub fn without_vid(mut self) -> Self {
        self.vid = None;
        self
    }

    /// Sets or clears the Discord user ID.
    ///
    /// # Arguments
    /// - `discord_id` - Decimal Discord ID, or `None` for a record never linked to Discord
    pub fn discord_id(mut self, discord_id: Option<impl Into<String>>) -> Self {
        self.discord_user_id = discord_id.map(Into::into);
        self
    }

    /// Sets the stored Discord username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.discord_username = Some(username.into());
        self
    }

    /// Sets first and last name.
    pub fn names(mut self, firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        self.firstname = Some(firstname.into());
        self.lastname = Some(lastname.into());
        self
    }

    /// Sets or clears the refresh token.
    ///
    /// Empty strings are stored as-is, which lets tests model blank tokens.
    pub fn refresh_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.refresh_token = token.map(Into::into);
        self
    }

    /// Sets or clears the refresh token timestamp.
    pub fn refresh_token_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.refresh_token_date = date;
        self
    }

    /// Sets the verified flag.
    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Sets the banned flag.
    pub fn banned(mut self, banned: bool) -> Self {
        self.is_banned = banned;
        self
    }

    /// Builds and inserts the identity record.
    ///
    /// # Returns
    /// - `Ok(entity::user_data::Model)` - Created record
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user_data::Model, DbErr> {
        entity::user_data::ActiveModel {
            vid: ActiveValue::Set(self.vid),
            discord_user_id: ActiveValue::Set(self.discord_user_id),
            discord_username: ActiveValue::Set(self.discord_username),
            firstname: ActiveValue::Set(self.firstname),
            lastname: ActiveValue::Set(self.lastname),
            refresh_token: ActiveValue::Set(self.refresh_token),
            refresh_token_date: ActiveValue::Set(self.refresh_token_date),
            verified: ActiveValue::Set(self.verified),
            is_banned: ActiveValue::Set(self.is_banned),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an identity record with default values.
///
/// Shorthand for `UserDataFactory::new(db).build().await`.
pub async fn create_user_data(
    db: &DatabaseConnection,
) -> Result<entity::user_data::Model, DbErr> {
    UserDataFactory::new(db).build().await
}
