use super::*;

/// Tests moving an active event to another host.
///
/// Expected: Ok(Event) owned by the new host, still active
#[tokio::test]
async fn moves_event_to_new_host() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::create_event(db, "123456789012345678").await?;

    let repo = EventRepository::new(db);
    let moved = repo.transfer(event.id, 223456789012345678).await?;

    assert_eq!(moved.host_id, 223456789012345678);
    assert!(moved.is_active());
    assert!(repo.find_active(123456789012345678).await?.is_none());

    Ok(())
}

/// Tests transferring an event that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_for_unknown_event() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = EventRepository::new(db).transfer(999, 1).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
