// ABOUTME: Workout sharing endpoints under /api/share
// ABOUTME: Creates idempotent public shares and resolves them to workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ServerContext;
use crate::errors::AppResult;
use crate::middleware::{authenticate, rate_limit};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

/// Build the `/api/share` sub-router
pub fn router(ctx: &ServerContext) -> Router {
    Router::new()
        .route("/workouts/:workout_id", post(share_workout))
        .route("/:share_id", get(get_shared_workout))
        .route("/:share_id", delete(delete_share))
        .layer(axum::middleware::from_fn_with_state(
            ctx.limiters.share.clone(),
            rate_limit,
        ))
        .layer(axum::middleware::from_fn_with_state(
            ctx.auth_manager.clone(),
            authenticate,
        ))
        .with_state(ctx.clone())
}

async fn share_workout(
    State(ctx): State<ServerContext>,
    Path(workout_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let workout_id = super::parse_id(&workout_id, "Workout")?;
    let share = ctx.share_service.share_workout(workout_id).await?;
    Ok((StatusCode::CREATED, Json(share)))
}

async fn get_shared_workout(
    State(ctx): State<ServerContext>,
    Path(share_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let share_id = super::parse_id(&share_id, "Shared workout")?;
    let details = ctx.share_service.get_shared_workout(share_id).await?;
    Ok(Json(details))
}

async fn delete_share(
    State(ctx): State<ServerContext>,
    Path(share_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let share_id = super::parse_id(&share_id, "Shared workout")?;
    ctx.share_service.delete_share(share_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
