// ABOUTME: SQLite database management and schema migration
// ABOUTME: Owns the connection pool and row-mapping helpers for the adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! SQLite adapter behind the repository ports. `Database::new` connects and
//! runs the `CREATE TABLE IF NOT EXISTS` migrations; per-entity operations
//! live in sibling modules.

mod exercises;
mod shares;
mod users;
mod workouts;

use crate::errors::{AppError, AppResult};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use uuid::Uuid;

/// Database manager for all persisted entities
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    /// Returns an error if the connection or a migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // A pooled in-memory SQLite database only stays alive while a single
        // connection holds it open, so pin the pool to one connection there.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await?
        } else {
            // Ensure SQLite creates the database file if it doesn't exist
            SqlitePool::connect(&format!("{database_url}?mode=rwc")).await?
        };

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        self.migrate_shares().await?;
        self.migrate_users().await?;
        Ok(())
    }
}

/// Parse a TEXT column back into a [`Uuid`]
fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::database(format!("Invalid UUID in database: {value}: {e}")))
}

/// Convert a stored unix timestamp back into a [`DateTime<Utc>`]
fn parse_timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_else(Utc::now)
}
