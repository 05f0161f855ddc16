// ABOUTME: Exercise catalog endpoints under /api/exercises
// ABOUTME: Reads for any authenticated user, mutations for admins only
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ServerContext;
use crate::errors::AppResult;
use crate::middleware::{authenticate, check_permission, rate_limit, Action, AuthenticatedUser};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateExerciseRequest {
    name: Option<String>,
    muscle_group: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateExerciseRequest {
    name: Option<String>,
    muscle_group: Option<String>,
}

/// Build the `/api/exercises` sub-router
pub fn router(ctx: &ServerContext) -> Router {
    let mutations = Router::new()
        .route("/", post(create_exercise))
        .route("/:id", put(update_exercise))
        .route("/:id", delete(delete_exercise))
        .layer(axum::middleware::from_fn_with_state(
            ctx.limiters.mutation.clone(),
            rate_limit,
        ));

    Router::new()
        .route("/", get(list_exercises))
        .route("/:id", get(get_exercise))
        .merge(mutations)
        .layer(axum::middleware::from_fn_with_state(
            ctx.auth_manager.clone(),
            authenticate,
        ))
        .with_state(ctx.clone())
}

async fn create_exercise(
    State(ctx): State<ServerContext>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(request): Json<CreateExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    check_permission(&actor, Action::ManageExercises)?;
    let exercise = ctx
        .exercise_service
        .create(request.name.unwrap_or_default(), request.muscle_group)
        .await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn list_exercises(State(ctx): State<ServerContext>) -> AppResult<impl IntoResponse> {
    let exercises = ctx.exercise_service.list().await?;
    Ok(Json(exercises))
}

async fn get_exercise(
    State(ctx): State<ServerContext>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = super::parse_id(&id, "Exercise")?;
    let exercise = ctx.exercise_service.get(id).await?;
    Ok(Json(exercise))
}

async fn update_exercise(
    State(ctx): State<ServerContext>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    check_permission(&actor, Action::ManageExercises)?;
    let id = super::parse_id(&id, "Exercise")?;
    let exercise = ctx
        .exercise_service
        .update(id, request.name, request.muscle_group)
        .await?;
    Ok(Json(exercise))
}

async fn delete_exercise(
    State(ctx): State<ServerContext>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    check_permission(&actor, Action::ManageExercises)?;
    let id = super::parse_id(&id, "Exercise")?;
    ctx.exercise_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
