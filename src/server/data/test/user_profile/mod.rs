use crate::server::{data::user_profile::UserProfileRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod adjust_points;
mod get_points;
mod upsert;
