use super::*;

/// Tests listing a member's running cooldowns.
///
/// Expected: unexpired records of that member only, soonest first
#[tokio::test]
async fn lists_unexpired_cooldowns_of_member() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ranking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    let member = "123456789012345678";

    factory::rank_cooldown::RankCooldownFactory::new(db, member, "SGT")
        .cooldown_until(now + Duration::days(3))
        .build()
        .await?;
    factory::rank_cooldown::RankCooldownFactory::new(db, member, "JSG")
        .cooldown_until(now + Duration::days(1))
        .build()
        .await?;
    factory::rank_cooldown::RankCooldownFactory::new(db, member, "PVT")
        .cooldown_until(now - Duration::days(1))
        .build()
        .await?;
    factory::rank_cooldown::RankCooldownFactory::new(db, "223456789012345678", "SGT")
        .cooldown_until(now + Duration::days(2))
        .build()
        .await?;

    let cooldowns = RankCooldownRepository::new(db)
        .find_active_by_user(123456789012345678, now)
        .await?;

    let ranks: Vec<&str> = cooldowns.iter().map(|c| c.rank.as_str()).collect();
    assert_eq!(ranks, vec!["JSG", "SGT"]);

    Ok(())
}
