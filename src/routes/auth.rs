// ABOUTME: Login endpoint under /api/auth
// ABOUTME: Exchanges credentials for a signed token, behind the auth rate limit tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::users::UserResponse;
use super::ServerContext;
use crate::errors::{AppError, AppResult};
use crate::middleware::rate_limit;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    user: UserResponse,
    token: String,
}

/// Build the `/api/auth` sub-router
pub fn router(ctx: &ServerContext) -> Router {
    Router::new()
        .route("/login", post(login))
        .layer(axum::middleware::from_fn_with_state(
            ctx.limiters.auth.clone(),
            rate_limit,
        ))
        .with_state(ctx.clone())
}

async fn login(
    State(ctx): State<ServerContext>,
    Json(request): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(AppError::invalid_input("Email and password are required"));
        }
    };

    let (user, token) = ctx.auth_service.login(&email, &password).await?;
    Ok(Json(LoginResponse {
        user: UserResponse::from(user),
        token,
    }))
}
