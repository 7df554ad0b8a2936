//! Member verification.
//!
//! Resolves a guild member to an identity record, checks the ban flag, rotates the
//! refresh token and fetches the IVAO profile, then writes the profile back.

use sea_orm::DatabaseConnection;

use crate::{
    data::{identity::IdentityRepository, pool::DatabasePool},
    error::verification::VerificationError,
    model::{
        identity::{non_blank, IdentityKey, IdentityRecord, LookupMethod, ProfileUpdate},
        member::MemberSubject,
        profile::Profile,
    },
    service::token::TokenService,
    util::{
        display_name::{parse_name_pair, parse_vid},
        parse::parse_u64_from_string,
    },
};

/// Successful verification.
#[derive(Debug, Clone)]
pub struct Verification {
    /// Record as resolved, after any Discord id rebinding.
    pub record: IdentityRecord,
    /// Upstream profile with first/last name backfilled from the record.
    pub profile: Profile,
    pub method: LookupMethod,
}

/// Service verifying guild members against their stored IVAO identity.
pub struct VerificationService<'a> {
    pool: &'a DatabasePool,
    tokens: &'a TokenService,
}

impl<'a> VerificationService<'a> {
    /// Creates a new VerificationService instance.
    ///
    /// # Arguments
    /// - `pool` - Shared connection pool
    /// - `tokens` - Guarded token rotation service
    pub fn new(pool: &'a DatabasePool, tokens: &'a TokenService) -> Self {
        Self { pool, tokens }
    }

    /// Verifies a member and writes the refreshed profile back.
    ///
    /// # Returns
    /// - `Ok(Verification)` - Record resolved, token rotated, profile fetched and stored
    /// - `Err(VerificationError)` - See `VerificationError::code` for the mapping
    pub async fn verify(&self, member: &MemberSubject) -> Result<Verification, VerificationError> {
        let db = self.pool.connection().await?;
        let repo = IdentityRepository::new(&db);

        let (record, method) = resolve_identity(&db, member)
            .await?
            .ok_or(VerificationError::IdentityNotFound {
                discord_id: member.discord_id,
            })?;

        if record.is_banned {
            return Err(VerificationError::UserBanned);
        }
        if record.refresh_token.is_none() {
            return Err(VerificationError::ReauthenticationRequired {
                record_id: record.id,
            });
        }

        let key = exchange_key(&record, method, member.discord_id)?;

        let pair = self
            .tokens
            .refresh_identity(&db, &key)
            .await
            .map_err(|e| VerificationError::from_token_error(e, record.id))?;

        let mut profile = self.tokens.oauth().fetch_profile(&pair.access_token).await?;

        profile.first_name = non_blank(profile.first_name).or_else(|| record.firstname.clone());
        profile.last_name = non_blank(profile.last_name).or_else(|| record.lastname.clone());

        repo.update_profile(
            &key,
            ProfileUpdate {
                username: member.username.clone(),
                firstname: profile.first_name.clone(),
                lastname: profile.last_name.clone(),
            },
        )
        .await?;

        Ok(Verification {
            record,
            profile,
            method,
        })
    }
}

/// Locates the identity record for a member.
///
/// Looks up by Discord id first. On a miss, tries in order the Discord username, the
/// name pair parsed from the display name, and the VID parsed from the display name;
/// the first hit wins. A record found by fallback that has a VID is rebound to the
/// member's Discord id.
///
/// # Returns
/// - `Ok(Some((record, method)))` - Record found, with the lookup that found it
/// - `Ok(None)` - No lookup matched
/// - `Err(DbErr)` - Database error during a lookup or the rebinding
pub async fn resolve_identity(
    db: &DatabaseConnection,
    member: &MemberSubject,
) -> Result<Option<(IdentityRecord, LookupMethod)>, sea_orm::DbErr> {
    let repo = IdentityRepository::new(db);

    if let Some(record) = repo.find_by_discord_id(member.discord_id).await? {
        return Ok(Some((record, LookupMethod::DiscordId)));
    }

    let vid = parse_vid(&member.display_name);
    if let Some(vid) = &vid {
        tracing::debug!(
            "Extracted VID {} from display name '{}'",
            vid,
            member.display_name
        );
    }

    let mut found = repo
        .find_by_discord_username(&member.username)
        .await?
        .map(|record| (record, LookupMethod::Username));

    if found.is_none() {
        if let Some((firstname, lastname)) = parse_name_pair(&member.display_name) {
            found = repo
                .find_by_name(&firstname, &lastname)
                .await?
                .map(|record| (record, LookupMethod::NamePair));
        }
    }

    if found.is_none() {
        if let Some(vid) = &vid {
            found = repo
                .find_by_vid(vid)
                .await?
                .map(|record| (record, LookupMethod::Vid));
        }
    }

    let Some((mut record, method)) = found else {
        return Ok(None);
    };

    tracing::info!(
        "Found record {} for {} ({}) by {}",
        record.id,
        member.username,
        member.discord_id,
        method
    );

    if let Some(vid) = record.vid.clone() {
        repo.update_discord_id_for_vid(&vid, member.discord_id).await?;
        tracing::info!(
            "Updated discord_user_id for VID {} from {:?} to {}",
            vid,
            record.discord_user_id,
            member.discord_id
        );
        record.discord_user_id = Some(member.discord_id.to_string());
    }

    Ok(Some((record, method)))
}

/// Key to exchange and write back under.
///
/// The member's own id only when the direct Discord id lookup found the record. A
/// record reached by a fallback, and therefore possibly just rebound, is addressed by
/// its VID; without one, the stored Discord id is used as found.
fn exchange_key(
    record: &IdentityRecord,
    method: LookupMethod,
    discord_id: u64,
) -> Result<IdentityKey, VerificationError> {
    if method == LookupMethod::DiscordId && record.is_bound_to(discord_id) {
        return Ok(IdentityKey::DiscordId(discord_id));
    }
    if let Some(vid) = &record.vid {
        return Ok(IdentityKey::Vid(vid.clone()));
    }
    match &record.discord_user_id {
        Some(stored) => Ok(IdentityKey::DiscordId(parse_u64_from_string(stored.clone())?)),
        None => Err(VerificationError::IdentityNotFound { discord_id }),
    }
}
