use super::*;
use chrono::{Duration, Utc};

/// Tests selecting records by rotation age.
///
/// Expected: only tokens rotated before the cutoff, undated tokens excluded
#[tokio::test]
async fn selects_stale_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let stale = UserDataFactory::new(db)
        .refresh_token_date(Some(now - Duration::days(15)))
        .build()
        .await?;
    UserDataFactory::new(db)
        .refresh_token_date(Some(now - Duration::days(2)))
        .build()
        .await?;
    UserDataFactory::new(db)
        .refresh_token_date(None)
        .build()
        .await?;
    UserDataFactory::new(db)
        .refresh_token(None::<String>)
        .refresh_token_date(Some(now - Duration::days(40)))
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let records = repo
        .find_with_refresh_token_older_than(now - Duration::days(10))
        .await?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, stale.id);

    Ok(())
}
