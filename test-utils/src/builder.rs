use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` or one of the grouped helpers, then call
/// `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{RankCooldown, UserProfile};
///
/// let test = TestBuilder::new()
///     .with_table(UserProfile)
///     .with_table(RankCooldown)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables consulted by the promotion engine.
    ///
    /// Adds `UserProfile`, `RankCooldown` and `RankLock`.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_ranking_tables(self) -> Self {
        self.with_table(UserProfile)
            .with_table(RankCooldown)
            .with_table(RankLock)
    }

    /// Adds the tables required for event hosting and point awards.
    ///
    /// Adds `UserProfile`, `Event` and `EventParticipant` in dependency order.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_event_tables(self) -> Self {
        self.with_table(UserProfile)
            .with_table(Event)
            .with_table(EventParticipant)
    }

    /// Adds every table that holds per-member data.
    ///
    /// Used by member cleanup tests, which touch all of them at once.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_member_tables(self) -> Self {
        self.with_ranking_tables()
            .with_table(VerifiedUser)
            .with_table(OauthState)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
