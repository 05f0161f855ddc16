// ABOUTME: HTTP middleware for authentication and rate limiting
// ABOUTME: Request guards that run before the route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Middleware layers applied around the route handlers

/// Bearer-token authentication and the role policy
pub mod auth;
/// Fixed-window per-IP rate limiting
pub mod rate_limit;

pub use auth::{authenticate, check_permission, Action, AuthenticatedUser};
pub use rate_limit::{rate_limit, FixedWindowLimiter, RateLimiters};
