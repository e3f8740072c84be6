use super::*;

fn param(discord_id: u64, roblox_id: i64, username: &str) -> UpsertVerifiedUserParam {
    UpsertVerifiedUserParam {
        discord_id,
        roblox_id,
        roblox_username: username.to_string(),
        roblox_display_name: username.to_string(),
    }
}

/// Tests linking a Discord account for the first time.
///
/// Expected: Ok(VerifiedUser) with the Roblox details
#[tokio::test]
async fn creates_link() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VerifiedUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VerifiedUserRepository::new(db);
    let user = repo
        .upsert(param(123456789012345678, 42, "builderman"))
        .await?;

    assert_eq!(user.discord_id, 123456789012345678);
    assert_eq!(user.roblox_id, 42);
    assert_eq!(user.roblox_username, "builderman");

    Ok(())
}

/// Tests re-verifying with a different Roblox account.
///
/// Expected: the existing link is replaced rather than duplicated
#[tokio::test]
async fn replaces_existing_link() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VerifiedUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verified_user::VerifiedUserFactory::new(db, "123456789012345678")
        .roblox_id(42)
        .build()
        .await?;

    let repo = VerifiedUserRepository::new(db);
    repo.upsert(param(123456789012345678, 77, "newname")).await?;

    let user = repo.find_by_discord_id(123456789012345678).await?.unwrap();
    assert_eq!(user.roblox_id, 77);
    assert_eq!(user.roblox_username, "newname");
    assert!(repo.find_by_roblox_id(42).await?.is_none());

    Ok(())
}
