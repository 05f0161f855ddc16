// ABOUTME: Workout use-cases: CRUD plus adding exercises to a workout
// ABOUTME: Validates referenced entities exist and reps/interval are positive
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{AppError, AppResult};
use crate::models::{Workout, WorkoutExercise};
use crate::repositories::{ExerciseRepository, WorkoutRepository};
use std::sync::Arc;
use uuid::Uuid;

/// Application service for workouts and their exercise associations
#[derive(Clone)]
pub struct WorkoutService {
    workouts: Arc<dyn WorkoutRepository>,
    exercises: Arc<dyn ExerciseRepository>,
}

impl WorkoutService {
    /// Create a new workout service
    #[must_use]
    pub fn new(
        workouts: Arc<dyn WorkoutRepository>,
        exercises: Arc<dyn ExerciseRepository>,
    ) -> Self {
        Self {
            workouts,
            exercises,
        }
    }

    /// Create a workout with an empty exercise list
    ///
    /// # Errors
    /// Fails with 400 if the name is empty.
    pub async fn create(&self, name: String, description: Option<String>) -> AppResult<Workout> {
        let workout = Workout::new(Uuid::new_v4(), name, description)?;
        self.workouts.create(&workout).await
    }

    /// Get one workout with its joined exercise view
    ///
    /// # Errors
    /// Fails with 404 if absent.
    pub async fn get(&self, id: Uuid) -> AppResult<Workout> {
        self.workouts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))
    }

    /// List all workouts, each with its joined exercise view
    pub async fn list(&self) -> AppResult<Vec<Workout>> {
        self.workouts.find_all().await
    }

    /// Update a workout's name and description; join rows are untouched
    ///
    /// # Errors
    /// Fails with 404 if absent, 400 if the name is empty.
    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        description: Option<String>,
    ) -> AppResult<Workout> {
        let existing = self
            .workouts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        let updated = Workout::new(id, name, description)?;
        self.workouts.update(&updated).await?;

        // Return the joined view, which update() does not recompute
        Ok(Workout {
            exercises: existing.exercises,
            ..updated
        })
    }

    /// Delete a workout together with its join rows and share rows
    ///
    /// # Errors
    /// Fails with 404 if absent.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.workouts.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Workout"));
        }
        self.workouts.delete(id).await
    }

    /// Add an exercise to a workout and return the fresh joined view
    ///
    /// Adding the same exercise twice yields two coexisting join rows; that is
    /// accepted behavior (supersets repeat movements).
    ///
    /// # Errors
    /// Fails with 404 if the workout or exercise is absent, 400 if reps or
    /// interval is zero or negative.
    pub async fn add_exercise(
        &self,
        workout_id: Uuid,
        exercise_id: Uuid,
        reps: Option<i64>,
        interval: Option<i64>,
    ) -> AppResult<Workout> {
        if self.workouts.find_by_id(workout_id).await?.is_none() {
            return Err(AppError::not_found("Workout"));
        }
        if self.exercises.find_by_id(exercise_id).await?.is_none() {
            return Err(AppError::not_found("Exercise"));
        }
        if reps.is_some_and(|r| r <= 0) {
            return Err(AppError::invalid_input("Reps must be a positive integer"));
        }
        if interval.is_some_and(|i| i <= 0) {
            return Err(AppError::invalid_input(
                "Interval must be a positive integer",
            ));
        }

        let entry = WorkoutExercise {
            exercise_id,
            reps,
            interval,
        };
        self.workouts.add_exercise(workout_id, &entry).await?;

        self.workouts
            .find_by_id(workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))
    }
}
