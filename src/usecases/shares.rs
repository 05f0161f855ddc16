// ABOUTME: Share use-cases: share a workout, resolve a share, delete a share
// ABOUTME: Sharing is idempotent per workout and drives the QR generator port
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{AppError, AppResult};
use crate::models::{SharedWorkout, Workout};
use crate::repositories::{QrCodeGenerator, SharedWorkoutRepository, WorkoutRepository};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// A share joined with the workout it references
#[derive(Debug, Clone, Serialize)]
pub struct SharedWorkoutDetails {
    /// The share record
    pub share: SharedWorkout,
    /// The referenced workout, with its joined exercise view
    pub workout: Workout,
}

/// Application service for workout sharing
#[derive(Clone)]
pub struct ShareService {
    shares: Arc<dyn SharedWorkoutRepository>,
    workouts: Arc<dyn WorkoutRepository>,
    qr: Arc<dyn QrCodeGenerator>,
    base_url: String,
}

impl ShareService {
    /// Create a new share service
    #[must_use]
    pub fn new(
        shares: Arc<dyn SharedWorkoutRepository>,
        workouts: Arc<dyn WorkoutRepository>,
        qr: Arc<dyn QrCodeGenerator>,
        base_url: String,
    ) -> Self {
        Self {
            shares,
            workouts,
            qr,
            base_url,
        }
    }

    /// Share a workout, or return its existing share unchanged
    ///
    /// Idempotence contract: if one or more shares already exist for this
    /// workout the first one is returned, no new record is persisted, and the
    /// QR generator is not invoked again.
    ///
    /// # Errors
    /// Fails with 404 if the workout is absent; the share repository's
    /// `create` is never called in that case.
    pub async fn share_workout(&self, workout_id: Uuid) -> AppResult<SharedWorkout> {
        if self.workouts.find_by_id(workout_id).await?.is_none() {
            return Err(AppError::not_found("Workout"));
        }

        let existing = self.shares.find_by_workout_id(workout_id).await?;
        if let Some(share) = existing.into_iter().next() {
            return Ok(share);
        }

        let share_id = Uuid::new_v4();
        let link = format!("{}/share/{share_id}", self.base_url);
        let qr_code = self.qr.generate(&link)?;

        let share = SharedWorkout::new(share_id, workout_id, link, qr_code)?;
        self.shares.create(&share).await
    }

    /// Resolve a share into the joined `{share, workout}` view
    ///
    /// # Errors
    /// Fails with 404 if the share is absent, or if the referenced workout no
    /// longer exists (orphaned share guard).
    pub async fn get_shared_workout(&self, share_id: Uuid) -> AppResult<SharedWorkoutDetails> {
        let share = self
            .shares
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shared workout"))?;

        let workout = self
            .workouts
            .find_by_id(share.workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shared workout"))?;

        Ok(SharedWorkoutDetails { share, workout })
    }

    /// Delete a share
    ///
    /// # Errors
    /// Fails with 404 if absent.
    pub async fn delete_share(&self, share_id: Uuid) -> AppResult<()> {
        if self.shares.find_by_id(share_id).await?.is_none() {
            return Err(AppError::not_found("Shared workout"));
        }
        self.shares.delete(share_id).await
    }
}
