//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot commands and HTTP controllers on one side and the data
//! (repository) layer on the other. They are responsible for:
//!
//! - **Business Logic**: Promotion rules, point awards, linked role evaluation
//! - **Orchestration**: Coordinating repository calls with Discord role changes
//! - **Domain Models**: Working with domain models rather than entity models
//!
//! Discord side effects go through the `RoleProvider` and `AuditLog` traits so the rules
//! can be exercised without a gateway connection.

pub mod account_data;
pub mod audit_log;
pub mod event;
pub mod linked_roles;
pub mod member;
pub mod permission;
pub mod points;
pub mod profile;
pub mod rank_lock;
pub mod ranking;
pub mod role_provider;
pub mod verification;
