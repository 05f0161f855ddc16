// ABOUTME: Bearer-token authentication middleware and role policy evaluation
// ABOUTME: Validates JWTs, attaches the actor to the request, and checks permissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Authentication Middleware and Authorization Policy
//!
//! `authenticate` rejects requests without a valid `Authorization: Bearer`
//! token and attaches the decoded actor as a request extension. Role checks
//! are consolidated into one policy function, [`check_permission`], so similar
//! endpoints cannot drift apart.

use crate::auth::AuthManager;
use crate::errors::{AppError, AppResult};
use crate::models::UserRole;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use uuid::Uuid;

/// The authenticated caller, decoded from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User id
    pub id: Uuid,
    /// User email
    pub email: String,
    /// Role at token issuance time
    pub role: UserRole,
}

/// Authenticate the request and attach [`AuthenticatedUser`] as an extension
///
/// # Errors
/// Fails with 401 if the header is missing, not two parts, not the bearer
/// scheme, or the token does not validate.
pub async fn authenticate(
    State(auth_manager): State<Arc<AuthManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::auth_required("Authentication token is required"))?;

    let mut parts = header.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(AppError::auth_invalid("Token error")),
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::auth_invalid("Token malformatted"));
    }

    let claims = auth_manager.validate_token(token)?;
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::auth_invalid("Invalid token"))?;

    request.extensions_mut().insert(AuthenticatedUser {
        id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// An action a caller may attempt, for policy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, update, or delete catalog exercises
    ManageExercises,
    /// List all user accounts
    ListUsers,
    /// Read one user account
    ReadUser {
        /// Account being read
        target: Uuid,
    },
    /// Update one user account, possibly changing its role
    UpdateUser {
        /// Account being updated
        target: Uuid,
        /// Role being assigned, if any
        new_role: Option<UserRole>,
    },
    /// Delete one user account
    DeleteUser,
}

/// Evaluate whether `actor` may perform `action`
///
/// Single policy function for every role check in the route layer.
///
/// # Errors
/// Fails with 403 and a message describing the missing privilege.
pub fn check_permission(actor: &AuthenticatedUser, action: Action) -> AppResult<()> {
    match action {
        Action::ManageExercises | Action::ListUsers | Action::DeleteUser => {
            if actor.role.is_admin() {
                Ok(())
            } else {
                Err(AppError::forbidden("Insufficient permissions"))
            }
        }
        Action::ReadUser { target } => {
            if target == actor.id || actor.role.is_admin() {
                Ok(())
            } else {
                Err(AppError::forbidden("Insufficient permissions"))
            }
        }
        Action::UpdateUser { target, new_role } => {
            if new_role == Some(UserRole::Root) && actor.role != UserRole::Root {
                return Err(AppError::forbidden(
                    "Insufficient permissions to assign root role",
                ));
            }
            if new_role.is_some() && !actor.role.is_admin() {
                return Err(AppError::forbidden(
                    "Insufficient permissions to change roles",
                ));
            }
            if target == actor.id || actor.role.is_admin() {
                Ok(())
            } else {
                Err(AppError::forbidden("Insufficient permissions"))
            }
        }
    }
}
