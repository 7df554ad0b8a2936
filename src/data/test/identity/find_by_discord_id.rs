use super::*;

/// Tests finding a record by its bound Discord ID.
///
/// Expected: Ok(Some(IdentityRecord)) with matching data
#[tokio::test]
async fn finds_existing_record() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db)
        .discord_id(Some("123456789"))
        .vid("654321")
        .names("Jane", "Doe")
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let record = repo.find_by_discord_id(123456789).await?.unwrap();

    assert_eq!(record.discord_user_id.as_deref(), Some("123456789"));
    assert_eq!(record.vid.as_deref(), Some("654321"));
    assert_eq!(record.firstname.as_deref(), Some("Jane"));
    assert!(record.refresh_token.is_some());

    Ok(())
}

/// Tests querying for a Discord ID no record is bound to.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db).build().await?;

    let repo = IdentityRepository::new(db);
    let result = repo.find_by_discord_id(1).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that the lowest internal id wins when several rows share a Discord ID.
///
/// Expected: Ok(Some) with the first inserted record
#[tokio::test]
async fn returns_first_of_duplicates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = UserDataFactory::new(db)
        .discord_id(Some("42"))
        .build()
        .await?;
    UserDataFactory::new(db)
        .discord_id(Some("42"))
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let record = repo.find_by_discord_id(42).await?.unwrap();

    assert_eq!(record.id, first.id);

    Ok(())
}
