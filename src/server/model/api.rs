//! JSON bodies returned by the HTTP server.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Error body returned for failed API requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
