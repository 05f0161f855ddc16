// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration management

use crate::errors::{AppError, AppResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 3000;
/// Default JWT expiry in hours (one day, matching the mobile client's session)
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Fixed-window rate limit tier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitTier {
    /// Maximum requests per window per client IP
    pub max_requests: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

/// Rate limiting configuration, one tier per route group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Master switch; `DISABLE_RATE_LIMIT=true` turns limiting off (test mode)
    pub enabled: bool,
    /// All `/api` routes: 100 requests per 15 minutes
    pub global: RateLimitTier,
    /// Login attempts: 10 per hour
    pub auth: RateLimitTier,
    /// Create/update/delete operations: 600 per minute
    pub mutation: RateLimitTier,
    /// Share operations: 600 per minute
    pub share: RateLimitTier,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            global: RateLimitTier {
                max_requests: 100,
                window_secs: 15 * 60,
            },
            auth: RateLimitTier {
                max_requests: 10,
                window_secs: 60 * 60,
            },
            mutation: RateLimitTier {
                max_requests: 600,
                window_secs: 60,
            },
            share: RateLimitTier {
                max_requests: 600,
                window_secs: 60,
            },
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for JWT signing
    pub jwt_secret: Vec<u8>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server binds to
    pub http_port: u16,
    /// SQLite connection string, e.g. `sqlite:./data/liftlog.db`
    pub database_url: String,
    /// Public base URL used to construct share links
    pub base_url: String,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with sensible defaults
    ///
    /// # Errors
    /// Returns an error if a numeric variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid HTTP_PORT: {port}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/liftlog.db".to_owned());

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{http_port}"));

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                tracing::warn!(
                    "JWT_SECRET not set, generating an ephemeral secret; \
                     tokens will not survive a restart"
                );
                crate::auth::generate_jwt_secret().to_vec()
            }
        };

        let jwt_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(hours) => hours
                .parse::<i64>()
                .with_context(|| format!("Invalid JWT_EXPIRY_HOURS: {hours}"))?,
            Err(_) => DEFAULT_JWT_EXPIRY_HOURS,
        };

        let rate_limit = RateLimitConfig {
            enabled: env::var("DISABLE_RATE_LIMIT").as_deref() != Ok("true"),
            ..RateLimitConfig::default()
        };

        Ok(Self {
            http_port,
            database_url,
            base_url,
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            rate_limit,
        })
    }

    /// Validate invariants that cannot be expressed in the type system
    ///
    /// # Errors
    /// Returns an error if the base URL is empty or the JWT secret is too short.
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.is_empty() {
            return Err(AppError::invalid_input("BASE_URL must not be empty"));
        }
        if self.auth.jwt_secret.len() < 16 {
            return Err(AppError::invalid_input(
                "JWT_SECRET must be at least 16 bytes",
            ));
        }
        Ok(())
    }
}
