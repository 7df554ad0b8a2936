use super::*;

/// Tests finding a record by VID, including one never bound to Discord.
///
/// Expected: Ok(Some) with no Discord ID
#[tokio::test]
async fn finds_unbound_record_by_vid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db)
        .vid("123456")
        .discord_id(None::<String>)
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let record = repo.find_by_vid("123456").await?.unwrap();

    assert_eq!(record.vid.as_deref(), Some("123456"));
    assert!(record.discord_user_id.is_none());

    let by_key = repo
        .find_by_key(&IdentityKey::Vid("123456".to_string()))
        .await?
        .unwrap();
    assert_eq!(by_key.id, record.id);

    Ok(())
}

/// Tests that VID lookups compare the full string, leading zeros included.
///
/// Expected: Ok(None) for the zero-stripped form
#[tokio::test]
async fn does_not_strip_leading_zeros() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db).vid("0012345").build().await?;

    let repo = IdentityRepository::new(db);

    assert!(repo.find_by_vid("12345").await?.is_none());
    assert!(repo.find_by_vid("0012345").await?.is_some());

    Ok(())
}
