// ABOUTME: Core data models for the liftlog API
// ABOUTME: Defines Exercise, Workout, SharedWorkout, User and their validation rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Entities shared across the repository, use-case, and route layers.
//! Constructors are fallible: an entity either validates completely or is never
//! constructed. Serde renames keep the wire format camelCase, matching the
//! mobile client's contract.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

// Same permissive shape the clients validate against
#[allow(clippy::unwrap_used)]
fn email_regex() -> &'static regex::Regex {
    static EMAIL_RE: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// A single exercise in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique exercise id
    pub id: Uuid,
    /// Display name, unique across the catalog
    pub name: String,
    /// Optional muscle group label (may be explicitly cleared to "")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
}

impl Exercise {
    /// Build a validated exercise
    ///
    /// # Errors
    /// Returns an error if the name is empty.
    pub fn new(id: Uuid, name: String, muscle_group: Option<String>) -> AppResult<Self> {
        if name.is_empty() {
            return Err(AppError::invalid_input("Exercise name is required"));
        }
        Ok(Self {
            id,
            name,
            muscle_group,
        })
    }
}

/// One exercise entry inside a workout, with per-association attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    /// Referenced exercise id
    pub exercise_id: Uuid,
    /// Repetitions, when prescribed (positive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    /// Rest interval in seconds, when prescribed (positive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
}

/// A workout with its joined exercise view
///
/// The `exercises` field is derived from the join table, never stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Unique workout id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Joined exercise entries, in insertion order
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    /// Build a validated workout
    ///
    /// # Errors
    /// Returns an error if the name is empty.
    pub fn new(id: Uuid, name: String, description: Option<String>) -> AppResult<Self> {
        if name.is_empty() {
            return Err(AppError::invalid_input("Workout name is required"));
        }
        Ok(Self {
            id,
            name,
            description,
            exercises: Vec::new(),
        })
    }
}

/// A persisted public share of a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedWorkout {
    /// Unique share id; also the last path segment of `link`
    pub id: Uuid,
    /// Shared workout id
    pub workout_id: Uuid,
    /// Public link: `{base_url}/share/{id}`
    pub link: String,
    /// QR image of `link` as a data URL
    pub qr_code: String,
    /// When the share was created
    pub created_at: DateTime<Utc>,
}

impl SharedWorkout {
    /// Build a validated share record with `created_at = now`
    ///
    /// # Errors
    /// Returns an error if the link or QR code is empty.
    pub fn new(id: Uuid, workout_id: Uuid, link: String, qr_code: String) -> AppResult<Self> {
        if link.is_empty() {
            return Err(AppError::invalid_input("Link is required"));
        }
        if qr_code.is_empty() {
            return Err(AppError::invalid_input("QR Code is required"));
        }
        Ok(Self {
            id,
            workout_id,
            link,
            qr_code,
            created_at: Utc::now(),
        })
    }
}

/// Access role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account, self-service only
    User,
    /// May manage exercises and other users
    Admin,
    /// Admin plus the ability to grant the root role
    Root,
}

impl UserRole {
    /// String form as stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Root => "root",
        }
    }

    /// Whether this role carries administrative privileges
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::Root)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "root" => Ok(Self::Root),
            _ => Err(AppError::invalid_input("Invalid user role")),
        }
    }
}

/// A registered account
///
/// `password_hash` is a one-way bcrypt hash, never the plaintext, and is never
/// serialized into responses (route layer uses sanitized response types).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email, unique and format-validated
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Access role
    pub role: UserRole,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a validated user
    ///
    /// # Errors
    /// Returns an error if any required field is empty or the email format is
    /// invalid.
    pub fn new(
        id: Uuid,
        name: String,
        email: String,
        password_hash: String,
        role: UserRole,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if name.is_empty() {
            return Err(AppError::invalid_input("User name is required"));
        }
        if email.is_empty() {
            return Err(AppError::invalid_input("User email is required"));
        }
        if !email_regex().is_match(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if password_hash.is_empty() {
            return Err(AppError::invalid_input("User password is required"));
        }
        Ok(Self {
            id,
            name,
            email,
            password_hash,
            role,
            created_at,
        })
    }
}
