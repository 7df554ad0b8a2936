use super::*;
use chrono::{Duration, Utc};
use oauth2::RefreshToken;

/// Tests rotating the refresh token by Discord ID.
///
/// Expected: token replaced and rotation timestamp moved forward
#[tokio::test]
async fn rotates_token_by_discord_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let old_date = Utc::now() - Duration::days(30);
    UserDataFactory::new(db)
        .discord_id(Some("42"))
        .refresh_token(Some("old-token"))
        .refresh_token_date(Some(old_date))
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let now = Utc::now();
    let updated = repo
        .update_refresh_token(
            &IdentityKey::DiscordId(42),
            &RefreshToken::new("new-token".to_string()),
            now,
        )
        .await?;

    assert_eq!(updated, 1);
    let record = repo.find_by_discord_id(42).await?.unwrap();
    assert_eq!(record.refresh_token.unwrap().secret(), "new-token");
    assert!(record.refresh_token_date.unwrap() > old_date);

    Ok(())
}

/// Tests rotating the refresh token by VID leaves other records alone.
///
/// Expected: only the addressed record changes
#[tokio::test]
async fn rotates_token_by_vid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db)
        .vid("123456")
        .refresh_token(Some("a"))
        .build()
        .await?;
    UserDataFactory::new(db)
        .vid("654321")
        .refresh_token(Some("b"))
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    repo.update_refresh_token(
        &IdentityKey::Vid("123456".to_string()),
        &RefreshToken::new("rotated".to_string()),
        Utc::now(),
    )
    .await?;

    let rotated = repo.find_by_vid("123456").await?.unwrap();
    let other = repo.find_by_vid("654321").await?.unwrap();
    assert_eq!(rotated.refresh_token.unwrap().secret(), "rotated");
    assert_eq!(other.refresh_token.unwrap().secret(), "b");

    Ok(())
}
