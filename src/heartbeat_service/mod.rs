//! HeartbeatService - Device Liveness Persistence
//!
//! ## Responsibilities
//!
//! - Persist heartbeat signals to Postgres (device_heartbeats table)
//! - Serve the trailing-window query for the liveness indicator
//!
//! Same batch and skip semantics as EventLogService, with a single
//! `status` field and a shorter window.

use crate::error::Result;
use crate::models::IngestStats;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// Trailing window served by [`HeartbeatService::recent`]
const RECENT_WINDOW_MINUTES: i64 = 1;

/// Single heartbeat as posted by the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatReport {
    pub status: Option<String>,
}

/// Persisted heartbeat row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatRecord {
    /// Insert time, assigned by the database
    pub created_at: DateTime<Utc>,
    pub status: String,
}

/// HeartbeatService instance
pub struct HeartbeatService {
    pool: PgPool,
}

impl HeartbeatService {
    /// Create new HeartbeatService
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert every report that carries a `status`, one transaction per batch
    pub async fn record_batch(&self, reports: &[HeartbeatReport]) -> Result<IngestStats> {
        let mut tx = self.pool.begin().await?;
        let mut stats = IngestStats::default();

        for report in reports {
            let Some(status) = report.status.as_deref() else {
                stats.skipped += 1;
                continue;
            };

            sqlx::query("INSERT INTO device_heartbeats (status) VALUES ($1)")
                .bind(status)
                .execute(&mut *tx)
                .await?;

            stats.inserted += 1;
        }

        tx.commit().await?;
        Ok(stats)
    }

    /// Get all heartbeats recorded in the trailing window, oldest first
    pub async fn recent(&self) -> Result<Vec<HeartbeatRecord>> {
        let cutoff = Utc::now() - Duration::minutes(RECENT_WINDOW_MINUTES);

        let rows = sqlx::query(
            "SELECT created_at, status \
             FROM device_heartbeats \
             WHERE created_at >= $1 \
             ORDER BY created_at ASC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: PgRow) -> Result<HeartbeatRecord> {
    Ok(HeartbeatRecord {
        created_at: row.try_get("created_at")?,
        status: row.try_get("status")?,
    })
}
