// ABOUTME: Repository ports describing persistence operations per entity
// ABOUTME: Storage-agnostic traits implemented by the SQLite adapter in database/
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Repository Ports
//!
//! One trait per entity, independent of storage technology. The SQLite
//! adapter in [`crate::database`] implements all of them; tests substitute
//! in-memory fakes. Deletes at this layer are idempotent no-ops when the row
//! is absent; existence checks belong to the use-case layer.

use crate::errors::AppResult;
use crate::models::{Exercise, SharedWorkout, User, Workout, WorkoutExercise};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence operations for exercises
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Persist a new exercise
    async fn create(&self, exercise: &Exercise) -> AppResult<Exercise>;
    /// All exercises, unordered
    async fn find_all(&self) -> AppResult<Vec<Exercise>>;
    /// Look up one exercise by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Exercise>>;
    /// Look up one exercise by exact name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Exercise>>;
    /// Overwrite an existing exercise row
    async fn update(&self, exercise: &Exercise) -> AppResult<Exercise>;
    /// Remove an exercise and any join rows referencing it
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Persistence operations for workouts and their exercise associations
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Persist a new workout
    async fn create(&self, workout: &Workout) -> AppResult<Workout>;
    /// All workouts with their joined exercise views
    async fn find_all(&self) -> AppResult<Vec<Workout>>;
    /// Look up one workout with its joined exercise view
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workout>>;
    /// Overwrite name/description of an existing workout row
    async fn update(&self, workout: &Workout) -> AppResult<Workout>;
    /// Remove the workout, its join rows, and its share rows atomically
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    /// Insert one join row linking an exercise into a workout
    async fn add_exercise(&self, workout_id: Uuid, entry: &WorkoutExercise) -> AppResult<()>;
    /// Remove all join rows for one (workout, exercise) pair
    async fn remove_exercise(&self, workout_id: Uuid, exercise_id: Uuid) -> AppResult<()>;
    /// Join rows for a workout, in insertion order
    async fn get_workout_exercises(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutExercise>>;
}

/// Persistence operations for workout shares
#[async_trait]
pub trait SharedWorkoutRepository: Send + Sync {
    /// Persist a new share record
    async fn create(&self, share: &SharedWorkout) -> AppResult<SharedWorkout>;
    /// Look up one share by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SharedWorkout>>;
    /// All shares for a workout, oldest first
    async fn find_by_workout_id(&self, workout_id: Uuid) -> AppResult<Vec<SharedWorkout>>;
    /// Remove one share row
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Persistence operations for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: &User) -> AppResult<User>;
    /// All users, unordered
    async fn find_all(&self) -> AppResult<Vec<User>>;
    /// Look up one user by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    /// Look up one user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Overwrite an existing user row
    async fn update(&self, user: &User) -> AppResult<User>;
    /// Remove one user row
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Port for the external QR image renderer: text in, image data URL out
pub trait QrCodeGenerator: Send + Sync {
    /// Render `data` into an image data URL
    ///
    /// # Errors
    /// Returns an error if the payload cannot be encoded.
    fn generate(&self, data: &str) -> AppResult<String>;
}
