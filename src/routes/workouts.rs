// ABOUTME: Workout endpoints under /api/workouts
// ABOUTME: CRUD plus POST /:id/exercises for attaching catalog exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ServerContext;
use crate::errors::AppResult;
use crate::middleware::{authenticate, rate_limit};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateWorkoutRequest {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddExerciseRequest {
    exercise_id: Option<String>,
    reps: Option<i64>,
    interval: Option<i64>,
}

/// Build the `/api/workouts` sub-router
pub fn router(ctx: &ServerContext) -> Router {
    let mutations = Router::new()
        .route("/", post(create_workout))
        .route("/:id", put(update_workout))
        .route("/:id", delete(delete_workout))
        .route("/:id/exercises", post(add_exercise))
        .layer(axum::middleware::from_fn_with_state(
            ctx.limiters.mutation.clone(),
            rate_limit,
        ));

    Router::new()
        .route("/", get(list_workouts))
        .route("/:id", get(get_workout))
        .merge(mutations)
        .layer(axum::middleware::from_fn_with_state(
            ctx.auth_manager.clone(),
            authenticate,
        ))
        .with_state(ctx.clone())
}

async fn create_workout(
    State(ctx): State<ServerContext>,
    Json(request): Json<CreateWorkoutRequest>,
) -> AppResult<impl IntoResponse> {
    let workout = ctx
        .workout_service
        .create(request.name.unwrap_or_default(), request.description)
        .await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn list_workouts(State(ctx): State<ServerContext>) -> AppResult<impl IntoResponse> {
    let workouts = ctx.workout_service.list().await?;
    Ok(Json(workouts))
}

async fn get_workout(
    State(ctx): State<ServerContext>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = super::parse_id(&id, "Workout")?;
    let workout = ctx.workout_service.get(id).await?;
    Ok(Json(workout))
}

async fn update_workout(
    State(ctx): State<ServerContext>,
    Path(id): Path<String>,
    Json(request): Json<CreateWorkoutRequest>,
) -> AppResult<impl IntoResponse> {
    let id = super::parse_id(&id, "Workout")?;
    let workout = ctx
        .workout_service
        .update(id, request.name.unwrap_or_default(), request.description)
        .await?;
    Ok(Json(workout))
}

async fn delete_workout(
    State(ctx): State<ServerContext>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = super::parse_id(&id, "Workout")?;
    ctx.workout_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_exercise(
    State(ctx): State<ServerContext>,
    Path(id): Path<String>,
    Json(request): Json<AddExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    let workout_id = super::parse_id(&id, "Workout")?;
    let exercise_id = super::parse_id(&request.exercise_id.unwrap_or_default(), "Exercise")?;
    let workout = ctx
        .workout_service
        .add_exercise(workout_id, exercise_id, request.reps, request.interval)
        .await?;
    Ok(Json(workout))
}
