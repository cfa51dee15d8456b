//! Database schema bootstrap
//!
//! Ensures the two telemetry tables and their window-query indexes exist
//! before serving requests. Applied once on startup from `main`; safe to
//! call on every start, no-op when the objects already exist.

use crate::error::Result;
use sqlx::PgPool;

/// Create the telemetry tables and indexes (idempotent)
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    // Detection reports served by /recent
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS intruder_events (
            id              BIGSERIAL PRIMARY KEY,
            intruder_status TEXT             NOT NULL,
            face_id         TEXT,
            confidence      DOUBLE PRECISION,
            recorded_at     TIMESTAMPTZ      NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_intruder_events_recorded_at \
         ON intruder_events (recorded_at)",
    )
    .execute(&mut *tx)
    .await?;

    // Liveness signals served by /status
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS device_heartbeats (
            id         BIGSERIAL PRIMARY KEY,
            status     TEXT        NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_device_heartbeats_created_at \
         ON device_heartbeats (created_at)",
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Database schema ready");

    Ok(())
}
