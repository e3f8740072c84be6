//! CASF Bot Test Utils
//!
//! Provides shared testing utilities for the bot's repository and service tests. This crate
//! offers a builder pattern for creating test contexts with in-memory SQLite databases and
//! factories for seeding those databases with ranking, event and verification records.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders and `create_*` helpers for every entity
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::UserProfile;
//!
//! #[tokio::test]
//! async fn test_profile_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(UserProfile)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
