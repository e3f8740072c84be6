use crate::server::{
    data::rank_lock::RankLockRepository, error::AppError, model::rank_lock::CreateRankLockParam,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find;
