//! Identity record repository.
//!
//! Lookups return the first row by internal id when several rows match. All writes are
//! updates by predicate; records are provisioned elsewhere and never inserted or
//! deleted here.

use chrono::{DateTime, Utc};
use entity::user_data::Column;
use oauth2::RefreshToken;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Select,
};

use crate::model::identity::{IdentityKey, IdentityRecord, ProfileUpdate};

/// Repository providing database operations for identity records.
pub struct IdentityRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IdentityRepository<'a> {
    /// Creates a new IdentityRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `IdentityRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the record bound to a Discord user id.
    ///
    /// # Arguments
    /// - `discord_id` - Discord user ID as u64
    ///
    /// # Returns
    /// - `Ok(Some(IdentityRecord))` - First matching record
    /// - `Ok(None)` - No record bound to that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_discord_id(
        &self,
        discord_id: u64,
    ) -> Result<Option<IdentityRecord>, DbErr> {
        self.first(Condition::all().add(Column::DiscordUserId.eq(discord_id.to_string())))
            .await
    }

    /// Finds the record whose stored Discord username equals `username`.
    pub async fn find_by_discord_username(
        &self,
        username: &str,
    ) -> Result<Option<IdentityRecord>, DbErr> {
        self.first(Condition::all().add(Column::DiscordUsername.eq(username)))
            .await
    }

    /// Finds the record matching both first and last name exactly.
    pub async fn find_by_name(
        &self,
        firstname: &str,
        lastname: &str,
    ) -> Result<Option<IdentityRecord>, DbErr> {
        self.first(
            Condition::all()
                .add(Column::Firstname.eq(firstname))
                .add(Column::Lastname.eq(lastname)),
        )
        .await
    }

    /// Finds the record for an IVAO VID.
    pub async fn find_by_vid(&self, vid: &str) -> Result<Option<IdentityRecord>, DbErr> {
        self.first(Condition::all().add(Column::Vid.eq(vid))).await
    }

    /// Finds the record addressed by a token key.
    pub async fn find_by_key(&self, key: &IdentityKey) -> Result<Option<IdentityRecord>, DbErr> {
        self.first(key_condition(key)).await
    }

    /// Rebinds the record for `vid` to a Discord user id.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_discord_id_for_vid(
        &self,
        vid: &str,
        discord_id: u64,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::UserData::update_many()
            .col_expr(Column::DiscordUserId, Expr::value(discord_id.to_string()))
            .filter(Column::Vid.eq(vid))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Writes back username, names and the verified flag after a verification.
    ///
    /// Name columns are left untouched when the update carries no value for them.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        key: &IdentityKey,
        update: ProfileUpdate,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::UserData::update_many()
            .col_expr(Column::DiscordUsername, Expr::value(update.username))
            .col_expr(Column::Verified, Expr::value(true));

        if let Some(firstname) = update.firstname {
            query = query.col_expr(Column::Firstname, Expr::value(firstname));
        }
        if let Some(lastname) = update.lastname {
            query = query.col_expr(Column::Lastname, Expr::value(lastname));
        }

        let result = query.filter(key_condition(key)).exec(self.db).await?;

        Ok(result.rows_affected)
    }

    /// Replaces the stored refresh token and stamps the rotation time.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_refresh_token(
        &self,
        key: &IdentityKey,
        token: &RefreshToken,
        rotated_at: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::UserData::update_many()
            .col_expr(Column::RefreshToken, Expr::value(token.secret().clone()))
            .col_expr(Column::RefreshTokenDate, Expr::value(rotated_at))
            .filter(key_condition(key))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Returns every record with a non-null refresh token, ordered by internal id.
    ///
    /// Blank tokens are included so the caller can account for them.
    pub async fn find_all_with_refresh_token(&self) -> Result<Vec<IdentityRecord>, DbErr> {
        let rows = with_refresh_token().all(self.db).await?;

        Ok(rows.into_iter().map(IdentityRecord::from_entity).collect())
    }

    /// Returns records with a non-null refresh token rotated before `cutoff`.
    ///
    /// Records without a rotation timestamp are not included.
    pub async fn find_with_refresh_token_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<IdentityRecord>, DbErr> {
        let rows = with_refresh_token()
            .filter(Column::RefreshTokenDate.lt(cutoff))
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(IdentityRecord::from_entity).collect())
    }

    async fn first(&self, condition: Condition) -> Result<Option<IdentityRecord>, DbErr> {
        let entity = entity::prelude::UserData::find()
            .filter(condition)
            .order_by_asc(Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(IdentityRecord::from_entity))
    }
}

fn with_refresh_token() -> Select<entity::prelude::UserData> {
    entity::prelude::UserData::find()
        .filter(Column::RefreshToken.is_not_null())
        .order_by_asc(Column::Id)
}

fn key_condition(key: &IdentityKey) -> Condition {
    match key {
        IdentityKey::DiscordId(id) => Condition::all().add(Column::DiscordUserId.eq(id.to_string())),
        IdentityKey::Vid(vid) => Condition::all().add(Column::Vid.eq(vid.as_str())),
    }
}
