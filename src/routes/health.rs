// ABOUTME: Liveness endpoint at /health
// ABOUTME: Verifies the database connection answers a trivial query
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ServerContext;
use crate::errors::AppResult;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Report service health, including database reachability
pub async fn health(State(ctx): State<ServerContext>) -> AppResult<impl IntoResponse> {
    sqlx::query("SELECT 1").execute(ctx.database.pool()).await?;
    Ok(Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
