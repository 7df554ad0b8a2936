use super::*;

/// Tests finding a record by first and last name.
///
/// Expected: Ok(Some) only when both parts match
#[tokio::test]
async fn requires_both_name_parts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = UserDataFactory::new(db)
        .names("Ana", "de la Cruz")
        .build()
        .await?;
    UserDataFactory::new(db).names("Ana", "Lopez").build().await?;

    let repo = IdentityRepository::new(db);

    let record = repo.find_by_name("Ana", "de la Cruz").await?.unwrap();
    assert_eq!(record.id, created.id);

    assert!(repo.find_by_name("Ana", "Cruz").await?.is_none());

    Ok(())
}
