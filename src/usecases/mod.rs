// ABOUTME: Use-case layer organizing one application service per entity
// ABOUTME: Each service encodes the validation rules and repository orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Use-Cases
//!
//! One service per entity; each method is a single application operation
//! encapsulating its business rule plus repository orchestration. Services
//! hold their repository ports behind `Arc<dyn Trait>` and are constructed
//! once at process start (explicit dependency injection, no globals).

/// Login use-case
pub mod auth;
/// Exercise CRUD use-cases
pub mod exercises;
/// Share lifecycle use-cases
pub mod shares;
/// User account use-cases
pub mod users;
/// Workout CRUD and association use-cases
pub mod workouts;

pub use auth::AuthService;
pub use exercises::ExerciseService;
pub use shares::{ShareService, SharedWorkoutDetails};
pub use users::{UserService, UserUpdate};
pub use workouts::WorkoutService;
