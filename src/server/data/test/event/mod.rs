use crate::server::{
    data::event::EventRepository,
    error::AppError,
    model::event::{CreateEventParam, EndEventParam},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod end;
mod find_active;
mod transfer;
