//! Shared fixtures for unit and service tests.

pub mod config;
pub mod fakes;
