use crate::server::{data::event_participant::EventParticipantRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

mod count_by_user;
mod get_by_event;
mod upsert;
