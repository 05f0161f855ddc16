// ABOUTME: JWT-based user authentication and password hashing
// ABOUTME: Handles token generation, validation, and bcrypt password checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Authentication
//!
//! HS256 JWT issuance and validation plus bcrypt password hashing. Tokens
//! embed the user's id, email, and role so downstream authorization never has
//! to hit the database.

use crate::errors::{AppError, AppResult};
use crate::models::{User, UserRole};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// User role at issuance time
    pub role: UserRole,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authentication manager for `JWT` tokens and password hashes
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub const fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Hash a plaintext password with bcrypt
    ///
    /// # Errors
    /// Returns an error if bcrypt fails (never for ordinary inputs).
    pub fn hash_password(password: &str) -> AppResult<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    }

    /// Verify a plaintext password against a stored bcrypt hash
    ///
    /// # Errors
    /// Returns an error if the stored hash is not valid bcrypt output.
    pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
        bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
    }

    /// Generate a signed, time-limited token for a user
    ///
    /// # Errors
    /// Returns an error if JWT encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    /// Returns a 401 error if the signature is invalid, the token is
    /// malformed, or it has expired. The message is deliberately uniform.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("JWT validation failed: {e}");
            AppError::auth_invalid("Invalid token")
        })
    }
}

/// Generate a random `JWT` secret for deployments that did not configure one
#[must_use]
pub fn generate_jwt_secret() -> [u8; 64] {
    use rand::RngCore;

    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}
