use super::*;

/// Tests selecting records with a non-null refresh token.
///
/// Blank tokens are selected so bulk refresh can count them as failures.
///
/// Expected: null-token records excluded, blank-token records included
#[tokio::test]
async fn excludes_null_tokens_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let with_token = UserDataFactory::new(db).build().await?;
    let blank = UserDataFactory::new(db)
        .refresh_token(Some(""))
        .build()
        .await?;
    UserDataFactory::new(db)
        .refresh_token(None::<String>)
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let records = repo.find_all_with_refresh_token().await?;

    let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![with_token.id, blank.id]);
    assert!(records[1].refresh_token.is_none());

    Ok(())
}
