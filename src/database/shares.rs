// ABOUTME: Shared workout table operations
// ABOUTME: Implements the SharedWorkoutRepository port against SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::SharedWorkout;
use crate::repositories::SharedWorkoutRepository;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

fn row_to_share(row: &SqliteRow) -> AppResult<SharedWorkout> {
    Ok(SharedWorkout {
        id: parse_uuid(row.try_get("id")?)?,
        workout_id: parse_uuid(row.try_get("workout_id")?)?,
        link: row.try_get("link")?,
        qr_code: row.try_get("qr_code")?,
        created_at: parse_timestamp(row.try_get("created_at")?),
    })
}

impl Database {
    /// Create the shared_workouts table
    pub(super) async fn migrate_shares(&self) -> anyhow::Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS shared_workouts (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                link TEXT NOT NULL,
                qr_code TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_shared_workouts_workout_id \
             ON shared_workouts(workout_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SharedWorkoutRepository for Database {
    async fn create(&self, share: &SharedWorkout) -> AppResult<SharedWorkout> {
        sqlx::query(
            "INSERT INTO shared_workouts (id, workout_id, link, qr_code, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(share.id.to_string())
        .bind(share.workout_id.to_string())
        .bind(&share.link)
        .bind(&share.qr_code)
        .bind(share.created_at.timestamp())
        .execute(self.pool())
        .await?;
        Ok(share.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SharedWorkout>> {
        let row = sqlx::query(
            "SELECT id, workout_id, link, qr_code, created_at \
             FROM shared_workouts WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;
        row.as_ref().map(row_to_share).transpose()
    }

    async fn find_by_workout_id(&self, workout_id: Uuid) -> AppResult<Vec<SharedWorkout>> {
        let rows = sqlx::query(
            "SELECT id, workout_id, link, qr_code, created_at \
             FROM shared_workouts WHERE workout_id = $1 ORDER BY created_at, rowid",
        )
        .bind(workout_id.to_string())
        .fetch_all(self.pool())
        .await?;
        rows.iter().map(row_to_share).collect()
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM shared_workouts WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
