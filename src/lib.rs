//! Sentinel Telemetry
//!
//! Ingestion and retrieval service for intrusion-detection sensors.
//!
//! ## Architecture
//!
//! 1. EventLogService - detection report persistence
//! 2. HeartbeatService - device liveness persistence
//! 3. WebAPI - REST API endpoints
//! 4. Schema - idempotent table bootstrap
//!
//! ## Design Principles
//!
//! - Append-only storage: records are never updated or deleted here
//! - Stateless handlers: the pool is the only shared resource

pub mod error;
pub mod event_log_service;
pub mod heartbeat_service;
pub mod models;
pub mod schema;
pub mod state;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
