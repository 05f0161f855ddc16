// ABOUTME: HTTP route composition and shared server context
// ABOUTME: Wires services, middleware tiers, and sub-routers into one axum Router
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # HTTP Routes
//!
//! Each resource gets its own sub-router; [`router`] nests them under `/api`,
//! applies the global rate limit tier, and adds tracing and CORS layers.
//! Everything handlers need travels in [`ServerContext`].

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::middleware::{rate_limit, RateLimiters};
use crate::qr::SvgQrGenerator;
use crate::usecases::{
    AuthService, ExerciseService, ShareService, UserService, WorkoutService,
};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod auth;
pub mod exercises;
pub mod health;
pub mod shares;
pub mod users;
pub mod workouts;

/// Shared state for all route handlers
#[derive(Clone)]
pub struct ServerContext {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Database handle (kept for health checks)
    pub database: Arc<Database>,
    /// Token signing and verification
    pub auth_manager: Arc<AuthManager>,
    /// Exercise catalog use-cases
    pub exercise_service: ExerciseService,
    /// Workout use-cases
    pub workout_service: WorkoutService,
    /// Share use-cases
    pub share_service: ShareService,
    /// User account use-cases
    pub user_service: UserService,
    /// Login use-case
    pub auth_service: AuthService,
    /// Rate limiter tiers
    pub limiters: RateLimiters,
}

impl ServerContext {
    /// Wire up all services from configuration and an initialized database
    #[must_use]
    pub fn new(config: ServerConfig, database: Database) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_expiry_hours,
        ));
        let limiters = RateLimiters::new(&config.rate_limit);

        let exercise_service = ExerciseService::new(database.clone());
        let workout_service = WorkoutService::new(database.clone(), database.clone());
        let share_service = ShareService::new(
            database.clone(),
            database.clone(),
            Arc::new(SvgQrGenerator),
            config.base_url.clone(),
        );
        let user_service = UserService::new(database.clone());
        let auth_service = AuthService::new(database.clone(), auth_manager.clone());

        Self {
            config: Arc::new(config),
            database,
            auth_manager,
            exercise_service,
            workout_service,
            share_service,
            user_service,
            auth_service,
            limiters,
        }
    }
}

/// Build the full application router
#[must_use]
pub fn router(ctx: ServerContext) -> Router {
    let api = Router::new()
        .nest("/exercises", exercises::router(&ctx))
        .nest("/workouts", workouts::router(&ctx))
        .nest("/share", shares::router(&ctx))
        .nest("/users", users::router(&ctx))
        .nest("/auth", auth::router(&ctx))
        .layer(axum::middleware::from_fn_with_state(
            ctx.limiters.global.clone(),
            rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health))
        .with_state(ctx)
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Parse a path id, mapping failure to the resource's 404
///
/// Ids are opaque to clients; a malformed id cannot match any row and reads
/// the same as an unknown one.
fn parse_id(id: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::not_found(resource))
}
