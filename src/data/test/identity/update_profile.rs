use super::*;

/// Tests writing back username, names and the verified flag.
///
/// Expected: all columns updated
#[tokio::test]
async fn writes_back_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db)
        .discord_id(Some("42"))
        .username("old")
        .names("Old", "Name")
        .verified(false)
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    let updated = repo
        .update_profile(
            &IdentityKey::DiscordId(42),
            ProfileUpdate {
                username: "janedoe".to_string(),
                firstname: Some("Jane".to_string()),
                lastname: Some("Doe".to_string()),
            },
        )
        .await?;

    assert_eq!(updated, 1);
    let record = repo.find_by_discord_id(42).await?.unwrap();
    assert_eq!(record.discord_username.as_deref(), Some("janedoe"));
    assert_eq!(record.firstname.as_deref(), Some("Jane"));
    assert_eq!(record.lastname.as_deref(), Some("Doe"));
    assert!(record.verified);

    Ok(())
}

/// Tests that absent names never overwrite stored ones.
///
/// Expected: stored names unchanged, username and verified updated
#[tokio::test]
async fn keeps_stored_names_when_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserDataFactory::new(db)
        .vid("123456")
        .names("Jane", "Doe")
        .verified(false)
        .build()
        .await?;

    let repo = IdentityRepository::new(db);
    repo.update_profile(
        &IdentityKey::Vid("123456".to_string()),
        ProfileUpdate {
            username: "janedoe".to_string(),
            firstname: None,
            lastname: None,
        },
    )
    .await?;

    let record = repo.find_by_vid("123456").await?.unwrap();
    assert_eq!(record.firstname.as_deref(), Some("Jane"));
    assert_eq!(record.lastname.as_deref(), Some("Doe"));
    assert_eq!(record.discord_username.as_deref(), Some("janedoe"));
    assert!(record.verified);

    Ok(())
}
