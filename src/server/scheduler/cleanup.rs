use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{oauth_state::OauthStateRepository, rank_cooldown::RankCooldownRepository},
    error::AppError,
};

/// Top of every hour.
const CLEANUP_SCHEDULE: &str = "0 0 * * * *";

/// Rows purged by one cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiredCleanup {
    pub cooldowns: u64,
    pub oauth_states: u64,
}

/// Starts the hourly cleanup of expired cooldowns and OAuth state tokens.
///
/// The scheduler keeps running in the background once this returns.
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            match purge_expired(&db, Utc::now()).await {
                Ok(cleanup) => tracing::debug!(
                    "Purged {} expired cooldowns and {} expired OAuth states",
                    cleanup.cooldowns,
                    cleanup.oauth_states
                ),
                Err(e) => tracing::error!("Error purging expired records: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Cleanup scheduler started");

    Ok(())
}

/// Deletes cooldowns and OAuth states that expired before `now`.
pub async fn purge_expired(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<ExpiredCleanup, AppError> {
    Ok(ExpiredCleanup {
        cooldowns: RankCooldownRepository::new(db).delete_expired(now).await?,
        oauth_states: OauthStateRepository::new(db).delete_expired(now).await?,
    })
}
