//! CASF bot backend: Discord bot, OAuth verification server and business logic.
//!
//! The process runs three things side by side: the serenity gateway client handling
//! slash commands and member events, an axum server answering the verification OAuth
//! callbacks, and a cron scheduler purging expired records. All of them share one
//! `AppState`.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Slash command dispatch and gateway event handlers
//! - **Controller Layer** (`controller/`) - OAuth callback and health endpoints
//! - **Service Layer** (`service/`) - Ranking rules, points, events, linked roles and verification
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and the validated bot config
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based process configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, bot config)
//! - **Startup** (`startup`) - Database connection, migrations and OAuth clients
//! - **Router** (`router`) - Axum routes and per-IP rate limiting
//! - **Scheduler** (`scheduler/`) - Hourly purge of expired cooldowns and OAuth states
//!
//! # Command Flow
//!
//! 1. **Bot** receives an interaction and checks the caller's permission set
//! 2. **Command** handler reads the options and fetches the members involved
//! 3. **Service** applies the rules, calling Discord through `RoleProvider`
//! 4. **Data** persists cooldowns, rank locks, points and events
//! 5. **Command** turns the outcome into the ephemeral reply

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

#[cfg(test)]
pub mod test_support;
