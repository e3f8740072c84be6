use super::*;

/// Tests looking up a link from either side.
///
/// Expected: the same link by Discord ID and by Roblox ID
#[tokio::test]
async fn finds_by_discord_and_roblox_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VerifiedUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verified_user::VerifiedUserFactory::new(db, "123456789012345678")
        .roblox_id(1001)
        .roblox_username("pilot")
        .build()
        .await?;

    let repo = VerifiedUserRepository::new(db);

    let by_discord = repo.find_by_discord_id(123456789012345678).await?.unwrap();
    let by_roblox = repo.find_by_roblox_id(1001).await?.unwrap();
    assert_eq!(by_discord, by_roblox);
    assert_eq!(by_roblox.roblox_username, "pilot");
    assert!(repo.find_by_discord_id(223456789012345678).await?.is_none());

    Ok(())
}
