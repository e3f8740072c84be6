use super::*;

/// Tests starting an event.
///
/// Expected: Ok(Event) that is active and owned by the host
#[tokio::test]
async fn creates_active_event() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventRepository::new(db);
    let event = repo
        .create(CreateEventParam {
            name: "Border patrol".to_string(),
            event_type: "patrol".to_string(),
            host_id: 123456789012345678,
            start_time: Utc::now(),
        })
        .await?;

    assert!(event.is_active());
    assert_eq!(event.host_id, 123456789012345678);
    assert_eq!(event.event_type, "patrol");
    assert!(event.points_awarded.is_none());

    let stored = repo.find_by_id(event.id).await?.unwrap();
    assert_eq!(stored.name, "Border patrol");

    Ok(())
}
