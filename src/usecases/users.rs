// ABOUTME: User account use-cases: create, get, list, update, delete
// ABOUTME: Hashes passwords at rest and enforces email uniqueness
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::auth::AuthManager;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserRole};
use crate::repositories::UserRepository;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Optional field updates for a user; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name
    pub name: Option<String>,
    /// New email (must stay unique)
    pub email: Option<String>,
    /// New plaintext password, hashed before storage
    pub password: Option<String>,
    /// New role (authorization is enforced at the route layer)
    pub role: Option<UserRole>,
}

/// Application service for user accounts
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a user; the stored password is always a bcrypt hash
    ///
    /// # Errors
    /// Fails with 400 on missing fields or bad email format, 409 if the email
    /// is already registered.
    pub async fn create(
        &self,
        name: String,
        email: String,
        password: String,
        role: Option<UserRole>,
    ) -> AppResult<User> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::invalid_input(
                "Name, email and password are required",
            ));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User with this email already exists"));
        }

        let password_hash = AuthManager::hash_password(&password)?;
        let user = User::new(
            Uuid::new_v4(),
            name,
            email,
            password_hash,
            role.unwrap_or_default(),
            Utc::now(),
        )?;
        self.users.create(&user).await
    }

    /// Get one user by id
    ///
    /// # Errors
    /// Fails with 404 if absent.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Update a user, merging supplied fields over existing values
    ///
    /// # Errors
    /// Fails with 404 if absent, 409 if the new email belongs to another
    /// account.
    pub async fn update(&self, id: Uuid, update: UserUpdate) -> AppResult<User> {
        let existing = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        if let Some(new_email) = &update.email {
            if *new_email != existing.email
                && self.users.find_by_email(new_email).await?.is_some()
            {
                return Err(AppError::conflict("Email already in use"));
            }
        }

        let password_hash = match &update.password {
            Some(password) => AuthManager::hash_password(password)?,
            None => existing.password_hash,
        };

        let updated = User::new(
            existing.id,
            update.name.unwrap_or(existing.name),
            update.email.unwrap_or(existing.email),
            password_hash,
            update.role.unwrap_or(existing.role),
            existing.created_at,
        )?;
        self.users.update(&updated).await
    }

    /// Delete a user
    ///
    /// # Errors
    /// Fails with 404 if absent.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.users.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("User"));
        }
        self.users.delete(id).await
    }
}
