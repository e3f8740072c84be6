use super::*;

/// Tests consuming a valid token.
///
/// Expected: Ok(Some) the first time and Ok(None) afterwards
#[tokio::test]
async fn token_is_single_use() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_state::OauthStateFactory::new(db, "123456789012345678")
        .state_token("token")
        .build()
        .await?;

    let repo = OauthStateRepository::new(db);

    let state = repo.consume("token", Utc::now()).await?.unwrap();
    assert_eq!(state.discord_id, 123456789012345678);
    assert!(repo.consume("token", Utc::now()).await?.is_none());

    Ok(())
}

/// Tests consuming an expired token.
///
/// Expected: Ok(None) and the row removed
#[tokio::test]
async fn rejects_expired_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_state::OauthStateFactory::new(db, "123456789012345678")
        .state_token("stale")
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let repo = OauthStateRepository::new(db);

    assert!(repo.consume("stale", Utc::now()).await?.is_none());
    assert_eq!(repo.delete_expired(Utc::now()).await?, 0);

    Ok(())
}

/// Tests consuming a token that was never issued.
///
/// Expected: Ok(None)
#[tokio::test]
async fn rejects_unknown_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OauthStateRepository::new(db);

    assert!(repo.consume("missing", Utc::now()).await?.is_none());

    Ok(())
}
