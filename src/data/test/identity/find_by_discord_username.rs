use super::*;

/// Tests finding a record by stored Discord username.
///
/// Expected: Ok(Some) for an exact match, Ok(None) otherwise
#[tokio::test]
async fn finds_by_exact_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = UserDataFactory::new(db).username("janedoe").build().await?;

    let repo = IdentityRepository::new(db);

    let record = repo.find_by_discord_username("janedoe").await?.unwrap();
    assert_eq!(record.id, created.id);

    assert!(repo.find_by_discord_username("jane").await?.is_none());

    Ok(())
}
