// ABOUTME: Login use-case issuing signed tokens for valid credentials
// ABOUTME: Uses one uniform error for unknown email and wrong password
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::auth::AuthManager;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::repositories::UserRepository;
use std::sync::Arc;

/// Application service for authentication
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    auth_manager: Arc<AuthManager>,
}

impl AuthService {
    /// Create a new auth service
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, auth_manager: Arc<AuthManager>) -> Self {
        Self {
            users,
            auth_manager,
        }
    }

    /// Verify credentials and issue a signed, time-limited token
    ///
    /// Unknown email and wrong password produce the identical error message so
    /// the endpoint cannot be used to enumerate accounts.
    ///
    /// # Errors
    /// Fails with 401 `Invalid email or password` on any credential mismatch.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, String)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        if !AuthManager::verify_password(password, &user.password_hash)? {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let token = self.auth_manager.generate_token(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }
}
