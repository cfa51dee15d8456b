//! Shared models and types
//!
//! Types used across multiple modules to avoid circular dependencies.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub db_connected: bool,
}

/// Outcome of one ingestion batch.
///
/// Not part of the wire contract; callers log it so operators can see the
/// per-item skip filter working.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestStats {
    /// Rows written in this batch
    pub inserted: usize,
    /// Items dropped for missing their discriminating field
    pub skipped: usize,
}
