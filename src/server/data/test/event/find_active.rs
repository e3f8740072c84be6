use super::*;

/// Tests finding a host's active event.
///
/// Expected: Ok(Some) for the active event, ended events ignored
#[tokio::test]
async fn finds_active_event_for_host() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let host = "123456789012345678";
    factory::event::EventFactory::new(db, host)
        .ended(10)
        .build()
        .await?;
    let active = factory::event::EventFactory::new(db, host)
        .event_type("training")
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let found = repo.find_active(123456789012345678).await?.unwrap();

    assert_eq!(found.id, active.id);
    assert_eq!(found.event_type, "training");

    Ok(())
}

/// Tests that another host's event is not returned.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_other_hosts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_event(db, "223456789012345678").await?;

    let repo = EventRepository::new(db);

    assert!(repo.find_active(123456789012345678).await?.is_none());

    Ok(())
}
