// ABOUTME: Exercise use-cases: create, get, list, update, delete
// ABOUTME: Enforces name presence and catalog-wide name uniqueness
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{AppError, AppResult};
use crate::models::Exercise;
use crate::repositories::ExerciseRepository;
use std::sync::Arc;
use uuid::Uuid;

/// Application service for the exercise catalog
#[derive(Clone)]
pub struct ExerciseService {
    exercises: Arc<dyn ExerciseRepository>,
}

impl ExerciseService {
    /// Create a new exercise service
    #[must_use]
    pub fn new(exercises: Arc<dyn ExerciseRepository>) -> Self {
        Self { exercises }
    }

    /// Create an exercise
    ///
    /// # Errors
    /// Fails with 400 if the name is empty or already taken.
    pub async fn create(&self, name: String, muscle_group: Option<String>) -> AppResult<Exercise> {
        if name.is_empty() {
            return Err(AppError::invalid_input("Exercise name is required"));
        }

        if self.exercises.find_by_name(&name).await?.is_some() {
            return Err(AppError::invalid_input("Exercise already exists"));
        }

        let exercise = Exercise::new(Uuid::new_v4(), name, muscle_group)?;
        self.exercises.create(&exercise).await
    }

    /// Get one exercise by id
    ///
    /// # Errors
    /// Fails with 404 if absent.
    pub async fn get(&self, id: Uuid) -> AppResult<Exercise> {
        self.exercises
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Exercise"))
    }

    /// List all exercises
    pub async fn list(&self) -> AppResult<Vec<Exercise>> {
        self.exercises.find_all().await
    }

    /// Update an exercise, merging supplied fields over existing values
    ///
    /// A `Some("")` muscle group explicitly clears the label; `None` keeps the
    /// current value. Renaming to the exercise's own current name is not a
    /// conflict.
    ///
    /// # Errors
    /// Fails with 404 if absent, 400 if the new name belongs to a different
    /// exercise.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        muscle_group: Option<String>,
    ) -> AppResult<Exercise> {
        let existing = self
            .exercises
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Exercise"))?;

        if let Some(new_name) = &name {
            if !new_name.is_empty() && *new_name != existing.name {
                if let Some(other) = self.exercises.find_by_name(new_name).await? {
                    if other.id != id {
                        return Err(AppError::invalid_input("Exercise name already exists"));
                    }
                }
            }
        }

        let updated = Exercise::new(
            id,
            name.filter(|n| !n.is_empty()).unwrap_or(existing.name),
            muscle_group.map_or(existing.muscle_group, Some),
        )?;

        self.exercises.update(&updated).await
    }

    /// Delete an exercise (and, at the adapter level, its join rows)
    ///
    /// # Errors
    /// Fails with 404 if absent.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.exercises.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Exercise"));
        }
        self.exercises.delete(id).await
    }
}
