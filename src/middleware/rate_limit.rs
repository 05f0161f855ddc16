// ABOUTME: Fixed-window per-IP rate limiting middleware
// ABOUTME: One limiter instance per route tier, sharing a common implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Rate Limiting
//!
//! Fixed-window counters keyed by client IP. Each route tier (global, auth,
//! mutation, share) gets its own [`FixedWindowLimiter`] with its own window
//! length and message. Limiting can be disabled globally for tests via
//! `DISABLE_RATE_LIMIT=true`.

use crate::config::{RateLimitConfig, RateLimitTier};
use crate::errors::{AppError, AppResult};
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use dashmap::DashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Per-IP fixed-window request counter
pub struct FixedWindowLimiter {
    enabled: bool,
    max_requests: u32,
    window: Duration,
    message: String,
    windows: DashMap<IpAddr, Window>,
}

impl FixedWindowLimiter {
    /// Create a limiter for one tier
    #[must_use]
    pub fn new(enabled: bool, tier: &RateLimitTier, message: impl Into<String>) -> Self {
        Self {
            enabled,
            max_requests: tier.max_requests,
            window: Duration::from_secs(tier.window_secs),
            message: message.into(),
            windows: DashMap::new(),
        }
    }

    /// Count a request from `ip` against the current window
    ///
    /// # Errors
    /// Fails with 429 and the tier's message once the window cap is exceeded.
    pub fn check(&self, ip: IpAddr) -> AppResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let now = Instant::now();
        let mut entry = self.windows.entry(ip).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            tracing::warn!(%ip, "rate limit exceeded");
            return Err(AppError::rate_limited(self.message.clone()));
        }

        entry.count += 1;
        Ok(())
    }
}

/// The four limiter tiers, built once at startup and shared across requests
#[derive(Clone)]
pub struct RateLimiters {
    /// All `/api` routes
    pub global: Arc<FixedWindowLimiter>,
    /// Login attempts
    pub auth: Arc<FixedWindowLimiter>,
    /// Create/update/delete operations
    pub mutation: Arc<FixedWindowLimiter>,
    /// Share operations
    pub share: Arc<FixedWindowLimiter>,
}

impl RateLimiters {
    /// Build all tiers from configuration
    #[must_use]
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            global: Arc::new(FixedWindowLimiter::new(
                config.enabled,
                &config.global,
                "Too many requests from this IP, please try again after 15 minutes",
            )),
            auth: Arc::new(FixedWindowLimiter::new(
                config.enabled,
                &config.auth,
                "Too many login attempts from this IP, please try again after an hour",
            )),
            mutation: Arc::new(FixedWindowLimiter::new(
                config.enabled,
                &config.mutation,
                "Too many create/update requests from this IP, please try again after a minute",
            )),
            share: Arc::new(FixedWindowLimiter::new(
                config.enabled,
                &config.share,
                "Too many share requests from this IP, please try again after a minute",
            )),
        }
    }
}

/// Middleware applying one limiter tier to the wrapped routes
///
/// # Errors
/// Fails with 429 when the caller's window is exhausted.
pub async fn rate_limit(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limiter.check(addr.ip())?;
    Ok(next.run(request).await)
}
