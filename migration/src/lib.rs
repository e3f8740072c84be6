pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_profile_table;
mod m20260105_000002_create_rank_cooldown_table;
mod m20260105_000003_create_rank_lock_table;
mod m20260112_000004_create_event_table;
mod m20260112_000005_create_event_participant_table;
mod m20260120_000006_create_verified_user_table;
mod m20260120_000007_create_oauth_state_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_profile_table::Migration),
            Box::new(m20260105_000002_create_rank_cooldown_table::Migration),
            Box::new(m20260105_000003_create_rank_lock_table::Migration),
            Box::new(m20260112_000004_create_event_table::Migration),
            Box::new(m20260112_000005_create_event_participant_table::Migration),
            Box::new(m20260120_000006_create_verified_user_table::Migration),
            Box::new(m20260120_000007_create_oauth_state_table::Migration),
        ]
    }
}
