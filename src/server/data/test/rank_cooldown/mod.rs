use crate::server::{
    data::rank_cooldown::RankCooldownRepository, error::AppError,
    model::cooldown::CreateCooldownParam,
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_expired;
mod delete_for_rank;
mod find_active;
mod find_active_by_user;
