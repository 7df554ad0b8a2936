use super::*;

/// Tests rebinding a record to a new Discord ID by VID.
///
/// Expected: one row updated and the record now found by the new id
#[tokio::test]
async fn rebinds_discord_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db)
        .vid("123456")
        .discord_id(Some("111"))
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let updated = repo.update_discord_id_for_vid("123456", 222).await?;

    assert_eq!(updated, 1);
    assert!(repo.find_by_discord_id(111).await?.is_none());
    assert_eq!(
        repo.find_by_discord_id(222).await?.unwrap().vid.as_deref(),
        Some("123456")
    );

    Ok(())
}

/// Tests rebinding for a VID with no record.
///
/// Expected: zero rows updated
#[tokio::test]
async fn ignores_unknown_vid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = IdentityRepository::new(db);

    assert_eq!(repo.update_discord_id_for_vid("999999", 222).await?, 0);

    Ok(())
}
