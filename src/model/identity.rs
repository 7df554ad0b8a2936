//! Identity record domain model.

use std::fmt;

use chrono::{DateTime, Utc};
use oauth2::RefreshToken;

/// Key under which a stored refresh token is read and rotated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// Discord user id bound to the record.
    DiscordId(u64),
    /// IVAO VID of the record.
    Vid(String),
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiscordId(id) => write!(f, "user {}", id),
            Self::Vid(vid) => write!(f, "VID {}", vid),
        }
    }
}

/// Which lookup located an identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMethod {
    DiscordId,
    Username,
    NamePair,
    Vid,
}

impl fmt::Display for LookupMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DiscordId => "Discord ID",
            Self::Username => "Discord username",
            Self::NamePair => "name",
            Self::Vid => "VID",
        };
        f.write_str(label)
    }
}

/// Persisted binding between a Discord account and an IVAO identity.
///
/// Blank refresh tokens are normalised to `None` when converting from the entity, so
/// `refresh_token.is_some()` is the only precondition check callers need.
#[derive(Debug, Clone)]
pub struct IdentityRecord {
    pub id: i32,
    pub vid: Option<String>,
    /// Discord id as stored (text column).
    pub discord_user_id: Option<String>,
    pub discord_username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub refresh_token: Option<RefreshToken>,
    pub refresh_token_date: Option<DateTime<Utc>>,
    pub verified: bool,
    pub is_banned: bool,
}

impl IdentityRecord {
    /// Converts an entity model to the domain model at the repository boundary.
    pub fn from_entity(entity: entity::user_data::Model) -> Self {
        Self {
            id: entity.id,
            vid: non_blank(entity.vid),
            discord_user_id: non_blank(entity.discord_user_id),
            discord_username: entity.discord_username,
            firstname: non_blank(entity.firstname),
            lastname: non_blank(entity.lastname),
            refresh_token: non_blank(entity.refresh_token).map(RefreshToken::new),
            refresh_token_date: entity.refresh_token_date,
            verified: entity.verified,
            is_banned: entity.is_banned,
        }
    }

    /// Whether the stored Discord id is exactly `discord_id`.
    pub fn is_bound_to(&self, discord_id: u64) -> bool {
        self.discord_user_id.as_deref() == Some(discord_id.to_string().as_str())
    }

    /// Identifier used in bulk refresh error lines.
    ///
    /// `User <discord id> (VID: <vid>)`, or `VID <vid> (VID: <vid>)` for records never
    /// bound to Discord.
    pub fn identifier(&self) -> String {
        let vid = self.vid.as_deref().unwrap_or("unknown");
        match &self.discord_user_id {
            Some(discord_id) => format!("User {} (VID: {})", discord_id, vid),
            None => format!("VID {} (VID: {})", vid, vid),
        }
    }
}

/// Columns written back after a successful verification.
///
/// Name columns are only overwritten when a value is present; `verified` is always set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
