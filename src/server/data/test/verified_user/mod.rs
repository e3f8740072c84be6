use crate::server::{
    data::verified_user::VerifiedUserRepository, error::AppError,
    model::verification::UpsertVerifiedUserParam,
};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find;
mod upsert;
