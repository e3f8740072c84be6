//! Axum handlers for the OAuth verification callbacks and the health check.
//!
//! Verification handlers answer a browser, so failures render as HTML pages rather than
//! JSON bodies.

pub mod health;
pub mod verification;
