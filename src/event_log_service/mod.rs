//! EventLogService - Intruder Event Persistence
//!
//! ## Responsibilities
//!
//! - Persist detection reports to Postgres (intruder_events table)
//! - Serve the trailing-window query polled by the dashboard
//!
//! Reports arrive in batches; a batch shares one transaction and commits
//! once after the last item. Items without an `intruder_status` are
//! dropped, never rejected.

use crate::error::Result;
use crate::models::IngestStats;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// Trailing window served by [`EventLogService::recent`]
const RECENT_WINDOW_MINUTES: i64 = 5;

/// Single detection report as posted by the sensor.
///
/// Every field is optional on the wire; `intruder_status` decides whether
/// the report is persisted at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReport {
    pub intruder_status: Option<String>,
    pub face_id: Option<String>,
    pub confidence: Option<f64>,
}

/// Persisted event row as returned to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub intruder_status: String,
    pub face_id: Option<String>,
    pub confidence: Option<f64>,
    /// Insert time, assigned by the database
    pub timestamp: DateTime<Utc>,
}

/// EventLogService instance
pub struct EventLogService {
    pool: PgPool,
}

impl EventLogService {
    /// Create new EventLogService
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert every report that carries an `intruder_status`.
    ///
    /// All inserts share one transaction; a failure mid-batch rolls the
    /// whole batch back. The insert timestamp comes from the database
    /// column default, not from the caller.
    pub async fn record_batch(&self, reports: &[EventReport]) -> Result<IngestStats> {
        let mut tx = self.pool.begin().await?;
        let mut stats = IngestStats::default();

        for report in reports {
            let Some(status) = report.intruder_status.as_deref() else {
                stats.skipped += 1;
                continue;
            };

            sqlx::query(
                "INSERT INTO intruder_events (intruder_status, face_id, confidence) \
                 VALUES ($1, $2, $3)",
            )
            .bind(status)
            .bind(&report.face_id)
            .bind(report.confidence)
            .execute(&mut *tx)
            .await?;

            stats.inserted += 1;
        }

        tx.commit().await?;
        Ok(stats)
    }

    /// Get all events recorded in the trailing window, oldest first
    pub async fn recent(&self) -> Result<Vec<EventRecord>> {
        let cutoff = Utc::now() - Duration::minutes(RECENT_WINDOW_MINUTES);

        let rows = sqlx::query(
            "SELECT intruder_status, face_id, confidence, recorded_at \
             FROM intruder_events \
             WHERE recorded_at >= $1 \
             ORDER BY recorded_at ASC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: PgRow) -> Result<EventRecord> {
    Ok(EventRecord {
        intruder_status: row.try_get("intruder_status")?,
        face_id: row.try_get("face_id")?,
        confidence: row.try_get("confidence")?,
        timestamp: row.try_get("recorded_at")?,
    })
}
