// ABOUTME: Workout and workout_exercises table operations
// ABOUTME: Implements the WorkoutRepository port against SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::{Workout, WorkoutExercise};
use crate::repositories::WorkoutRepository;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

fn row_to_entry(row: &SqliteRow) -> AppResult<WorkoutExercise> {
    Ok(WorkoutExercise {
        exercise_id: parse_uuid(row.try_get("exercise_id")?)?,
        reps: row.try_get("reps")?,
        interval: row.try_get("interval")?,
    })
}

impl Database {
    /// Create the workouts table and the many-to-many join table
    pub(super) async fn migrate_workouts(&self) -> anyhow::Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                exercise_id TEXT NOT NULL REFERENCES exercises(id),
                reps INTEGER,
                interval INTEGER
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout_id \
             ON workout_exercises(workout_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn workout_from_row(&self, row: &SqliteRow) -> AppResult<Workout> {
        let id = parse_uuid(row.try_get("id")?)?;
        Ok(Workout {
            id,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            exercises: self.get_workout_exercises(id).await?,
        })
    }
}

#[async_trait]
impl WorkoutRepository for Database {
    async fn create(&self, workout: &Workout) -> AppResult<Workout> {
        sqlx::query("INSERT INTO workouts (id, name, description) VALUES ($1, $2, $3)")
            .bind(workout.id.to_string())
            .bind(&workout.name)
            .bind(&workout.description)
            .execute(self.pool())
            .await?;

        for entry in &workout.exercises {
            self.add_exercise(workout.id, entry).await?;
        }

        self.find_by_id(workout.id)
            .await?
            .ok_or_else(|| crate::errors::AppError::database("Workout vanished after insert"))
    }

    async fn find_all(&self) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query("SELECT id, name, description FROM workouts")
            .fetch_all(self.pool())
            .await?;

        let mut workouts = Vec::with_capacity(rows.len());
        for row in &rows {
            workouts.push(self.workout_from_row(row).await?);
        }
        Ok(workouts)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query("SELECT id, name, description FROM workouts WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => Ok(Some(self.workout_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    async fn update(&self, workout: &Workout) -> AppResult<Workout> {
        sqlx::query("UPDATE workouts SET name = $2, description = $3 WHERE id = $1")
            .bind(workout.id.to_string())
            .bind(&workout.name)
            .bind(&workout.description)
            .execute(self.pool())
            .await?;
        Ok(workout.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        // Join rows, share rows, and the workout row form one atomic unit
        let mut tx = self.pool().begin().await?;
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM shared_workouts WHERE workout_id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn add_exercise(&self, workout_id: Uuid, entry: &WorkoutExercise) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO workout_exercises (id, workout_id, exercise_id, reps, interval) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(workout_id.to_string())
        .bind(entry.exercise_id.to_string())
        .bind(entry.reps)
        .bind(entry.interval)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn remove_exercise(&self, workout_id: Uuid, exercise_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1 AND exercise_id = $2")
            .bind(workout_id.to_string())
            .bind(exercise_id.to_string())
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn get_workout_exercises(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutExercise>> {
        let rows = sqlx::query(
            "SELECT exercise_id, reps, interval FROM workout_exercises \
             WHERE workout_id = $1 ORDER BY rowid",
        )
        .bind(workout_id.to_string())
        .fetch_all(self.pool())
        .await?;
        rows.iter().map(row_to_entry).collect()
    }
}
