// ABOUTME: Main library entry point for the liftlog workout tracking API
// ABOUTME: Exposes models, repositories, use-cases, and the HTTP route layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Liftlog
//!
//! A workout tracking REST API. Users maintain an exercise catalog, compose
//! workouts from it, and publish workouts through shareable links with QR
//! codes.
//!
//! ## Features
//!
//! - **Exercise catalog**: uniquely-named exercises with muscle group labels
//! - **Workouts**: named exercise collections with per-entry reps and rest
//!   intervals
//! - **Sharing**: idempotent public share links rendered as QR data URLs
//! - **Accounts**: JWT authentication with user/admin/root roles
//! - **Rate limiting**: fixed-window per-IP tiers for login, mutation, and
//!   share traffic
//!
//! ## Architecture
//!
//! The crate follows a ports-and-adapters layout:
//! - **Models**: validated entities shared by every layer
//! - **Repositories**: async persistence ports plus the QR generation port
//! - **Database**: SQLite adapter implementing the ports
//! - **Usecases**: application services holding the business rules
//! - **Routes**: axum handlers, one sub-router per resource
//! - **Middleware**: bearer authentication and rate limiting
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftlog::config::ServerConfig;
//! use liftlog::database::Database;
//! use liftlog::routes::{router, ServerContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database_url).await?;
//!     let app = router(ServerContext::new(config, database));
//!     # let _ = app;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod qr;
pub mod repositories;
pub mod routes;
pub mod usecases;
