use super::*;

/// Tests writing a cooldown record.
///
/// Expected: Ok(RankCooldown) with the requested user, rank and expiry
#[tokio::test]
async fn creates_cooldown() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RankCooldown)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let until = Utc::now() + Duration::days(49);
    let repo = RankCooldownRepository::new(db);
    let cooldown = repo
        .create(CreateCooldownParam {
            user_id: 123456789012345678,
            rank: "LTT".to_string(),
            cooldown_until: until,
        })
        .await?;

    assert_eq!(cooldown.user_id, 123456789012345678);
    assert_eq!(cooldown.rank, "LTT");
    assert!((cooldown.cooldown_until - until).num_seconds().abs() < 1);

    Ok(())
}
