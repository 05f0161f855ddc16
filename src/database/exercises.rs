// ABOUTME: Exercise table operations
// ABOUTME: Implements the ExerciseRepository port against SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::Exercise;
use crate::repositories::ExerciseRepository;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    Ok(Exercise {
        id: parse_uuid(row.try_get("id")?)?,
        name: row.try_get("name")?,
        muscle_group: row.try_get("muscle_group")?,
    })
}

impl Database {
    /// Create the exercises table
    ///
    /// The UNIQUE constraint on `name` backs up the use-case level duplicate
    /// check against concurrent identical creates.
    pub(super) async fn migrate_exercises(&self) -> anyhow::Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                muscle_group TEXT
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_name ON exercises(name)")
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ExerciseRepository for Database {
    async fn create(&self, exercise: &Exercise) -> AppResult<Exercise> {
        sqlx::query("INSERT INTO exercises (id, name, muscle_group) VALUES ($1, $2, $3)")
            .bind(exercise.id.to_string())
            .bind(&exercise.name)
            .bind(&exercise.muscle_group)
            .execute(self.pool())
            .await?;
        Ok(exercise.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query("SELECT id, name, muscle_group FROM exercises")
            .fetch_all(self.pool())
            .await?;
        rows.iter().map(row_to_exercise).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT id, name, muscle_group FROM exercises WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(row_to_exercise).transpose()
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT id, name, muscle_group FROM exercises WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(row_to_exercise).transpose()
    }

    async fn update(&self, exercise: &Exercise) -> AppResult<Exercise> {
        sqlx::query("UPDATE exercises SET name = $2, muscle_group = $3 WHERE id = $1")
            .bind(exercise.id.to_string())
            .bind(&exercise.name)
            .bind(&exercise.muscle_group)
            .execute(self.pool())
            .await?;
        Ok(exercise.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        // Join rows referencing the exercise go with it, in one transaction
        let mut tx = self.pool().begin().await?;
        sqlx::query("DELETE FROM workout_exercises WHERE exercise_id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
