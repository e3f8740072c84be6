use super::*;

/// Tests purging expired tokens while keeping pending ones.
///
/// Expected: only the expired token is removed
#[tokio::test]
async fn purges_expired_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::oauth_state::OauthStateFactory::new(db, "123456789012345678")
        .expires_at(Utc::now() - Duration::minutes(5))
        .build()
        .await?;
    factory::oauth_state::OauthStateFactory::new(db, "223456789012345678")
        .state_token("pending")
        .build()
        .await?;

    let repo = OauthStateRepository::new(db);

    assert_eq!(repo.delete_expired(Utc::now()).await?, 1);
    assert!(repo.consume("pending", Utc::now()).await?.is_some());

    Ok(())
}

/// Tests removing all pending tokens for a member.
///
/// Expected: both of the member's tokens are removed
#[tokio::test]
async fn deletes_tokens_for_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_oauth_state(db, "123456789012345678").await?;
    factory::create_oauth_state(db, "123456789012345678").await?;

    let repo = OauthStateRepository::new(db);

    assert_eq!(repo.delete_by_user(123456789012345678).await?, 2);

    Ok(())
}
