use crate::server::{data::oauth_state::OauthStateRepository, error::AppError};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod consume;
mod create;
mod delete_expired;
