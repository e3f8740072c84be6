use super::*;

/// Tests demoting a member one rank down.
///
/// Expected: Success, cooldowns for the old rank cleared, roles swapped
#[tokio::test]
async fn demotes_and_clears_cooldowns() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ranking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_cooldown(db, MEMBER_ID, "LTT").await?;

    let config = ladder_config();
    let roles = FakeRoleProvider::new().with_member(MEMBER, &[LTT_ROLE]);
    let audit = RecordingAuditLog::new();
    let service = RankingService::new(db, &config.ranks, &roles, &audit);

    let result = service.demote(&order(&[LTT_ROLE], Some("CMD"))).await;

    assert_eq!(result.status, PromotionStatus::Success);
    assert_eq!(result.message, "Successfully demoted recruit from LTT to JLT");
    assert!(RankCooldownRepository::new(db)
        .find_active(MEMBER, "LTT", Utc::now())
        .await?
        .is_none());

    let held = roles.roles_of(MEMBER);
    assert!(held.contains(&RoleId::new(JLT_ROLE)));
    assert!(!held.contains(&RoleId::new(LTT_ROLE)));

    let entries = audit.entries();
    assert!(matches!(
        &entries[0],
        AuditEntry::RankChange { kind: RankChangeKind::Demotion, reason: Some(reason), .. }
            if reason == "No reason provided."
    ));

    Ok(())
}

/// Tests promoting back before the lower rank's cooldown has elapsed.
///
/// Expected: the demotion succeeds and the promotion back is rejected
#[tokio::test]
async fn promotion_back_respects_lower_rank_cooldown() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ranking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_profile_with_points(db, MEMBER_ID, 500).await?;
    factory::create_cooldown(db, MEMBER_ID, "JLT").await?;

    let config = ladder_config();
    let roles = FakeRoleProvider::new().with_member(MEMBER, &[LTT_ROLE]);
    let audit = RecordingAuditLog::new();
    let service = RankingService::new(db, &config.ranks, &roles, &audit);

    let demoted = service.demote(&order(&[LTT_ROLE], Some("CMD"))).await;
    assert!(demoted.is_success());

    let promoted = service.promote_next(&order(&[JLT_ROLE], Some("CMD"))).await;
    assert_eq!(promoted.status, PromotionStatus::CooldownActive);

    Ok(())
}

/// Tests demoting members at the bottom or without a rank.
///
/// Expected: NoEligibleRank
#[tokio::test]
async fn reports_no_lower_rank() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ranking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let config = ladder_config();
    let roles = FakeRoleProvider::new();
    let audit = RecordingAuditLog::new();
    let service = RankingService::new(db, &config.ranks, &roles, &audit);

    let bottom = service.demote(&order(&[JLT_ROLE], Some("CMD"))).await;
    assert_eq!(bottom.status, PromotionStatus::NoEligibleRank);
    assert_eq!(bottom.message, "User is already at minimum rank.");

    let unranked = service.demote(&order(&[], Some("CMD"))).await;
    assert_eq!(unranked.message, "User has no rank.");

    Ok(())
}

/// Tests demoting a locked member and demoting without authority.
///
/// Expected: RankLocked and Denied respectively, roles untouched
#[tokio::test]
async fn respects_lock_and_gate() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ranking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_rank_lock(db, MEMBER_ID, "LTT").await?;

    let config = ladder_config();
    let roles = FakeRoleProvider::new().with_member(MEMBER, &[LTT_ROLE]);
    let audit = RecordingAuditLog::new();
    let service = RankingService::new(db, &config.ranks, &roles, &audit);

    let locked = service.demote(&order(&[LTT_ROLE], Some("CMD"))).await;
    assert_eq!(locked.status, PromotionStatus::RankLocked);

    let denied = service.demote(&order(&[LTT_ROLE], Some("JLT"))).await;
    assert_eq!(denied.status, PromotionStatus::Denied);

    assert!(roles.calls().is_empty());

    Ok(())
}
