use super::*;

/// Tests storing a state token.
///
/// Expected: Ok(OauthState) carrying the member and tag
#[tokio::test]
async fn stores_state_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthState)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OauthStateRepository::new(db);
    let state = repo
        .create(
            "abc123",
            123456789012345678,
            Some("member".to_string()),
            Utc::now() + Duration::minutes(10),
        )
        .await?;

    assert_eq!(state.state_token, "abc123");
    assert_eq!(state.discord_id, 123456789012345678);
    assert_eq!(state.discord_user_tag.as_deref(), Some("member"));

    Ok(())
}
