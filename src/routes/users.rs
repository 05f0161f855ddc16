// ABOUTME: User account endpoints under /api/users
// ABOUTME: Public registration plus authenticated, role-checked account management
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ServerContext;
use crate::errors::AppResult;
use crate::middleware::{authenticate, check_permission, Action, AuthenticatedUser};
use crate::models::{User, UserRole};
use crate::usecases::UserUpdate;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<UserRole>,
}

/// A user as returned to clients; the password hash never leaves the server
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Access role
    pub role: UserRole,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Build the `/api/users` sub-router
pub fn router(ctx: &ServerContext) -> Router {
    // Registration stays public; everything else requires a token
    let protected = Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .layer(axum::middleware::from_fn_with_state(
            ctx.auth_manager.clone(),
            authenticate,
        ));

    Router::new()
        .route("/", post(create_user))
        .merge(protected)
        .with_state(ctx.clone())
}

async fn create_user(
    State(ctx): State<ServerContext>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let user = ctx
        .user_service
        .create(
            request.name.unwrap_or_default(),
            request.email.unwrap_or_default(),
            request.password.unwrap_or_default(),
            request.role,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

async fn list_users(
    State(ctx): State<ServerContext>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> AppResult<impl IntoResponse> {
    check_permission(&actor, Action::ListUsers)?;
    let users = ctx.user_service.list().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(users))
}

async fn get_user(
    State(ctx): State<ServerContext>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = super::parse_id(&id, "User")?;
    check_permission(&actor, Action::ReadUser { target: id })?;
    let user = ctx.user_service.get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

async fn update_user(
    State(ctx): State<ServerContext>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let id = super::parse_id(&id, "User")?;
    check_permission(
        &actor,
        Action::UpdateUser {
            target: id,
            new_role: request.role,
        },
    )?;
    let user = ctx
        .user_service
        .update(
            id,
            UserUpdate {
                name: request.name,
                email: request.email,
                password: request.password,
                role: request.role,
            },
        )
        .await?;
    Ok(Json(UserResponse::from(user)))
}

async fn delete_user(
    State(ctx): State<ServerContext>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    check_permission(&actor, Action::DeleteUser)?;
    let id = super::parse_id(&id, "User")?;
    ctx.user_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
