use super::*;

/// Tests closing an active event.
///
/// Expected: Ok(Event) with end time, award and notes set
#[tokio::test]
async fn closes_event() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::EventFactory::new(db, "123456789012345678")
        .start_time(Utc::now() - Duration::minutes(90))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let ended = repo
        .end(EndEventParam {
            event_id: event.id,
            end_time: Utc::now(),
            points_awarded: 15,
            notes: Some("Quiet night".to_string()),
            image_link: None,
        })
        .await?;

    assert!(!ended.is_active());
    assert_eq!(ended.points_awarded, Some(15));
    assert_eq!(ended.notes.as_deref(), Some("Quiet night"));
    assert!(repo.find_active(123456789012345678).await?.is_none());

    Ok(())
}

/// Tests closing an event that does not exist.
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

    let repo = EventRepository::new(db);
    let result = repo
        .end(EndEventParam {
            event_id: 999,
            end_time: Utc::now(),
            points_awarded: 0,
            notes: None,
            image_link: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
