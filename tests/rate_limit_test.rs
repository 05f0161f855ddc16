// ABOUTME: End-to-end tests for the fixed-window rate limit tiers
// ABOUTME: Runs a server with tiny windows and drives it over the caps
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftlog::config::RateLimitTier;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_attempts_hit_the_auth_tier() {
    let server = common::spawn_test_server_with(|config| {
        config.rate_limit.enabled = true;
        config.rate_limit.auth = RateLimitTier {
            max_requests: 2,
            window_secs: 3600,
        };
    })
    .await
    .unwrap();

    let attempt = || {
        server
            .client
            .post(server.api("/auth/login"))
            .json(&json!({ "email": "nobody@example.com", "password": "x" }))
            .send()
    };

    assert_eq!(attempt().await.unwrap().status(), StatusCode::UNAUTHORIZED);
    assert_eq!(attempt().await.unwrap().status(), StatusCode::UNAUTHORIZED);

    let response = attempt().await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Too many login attempts from this IP, please try again after an hour"
    );
}

#[tokio::test]
async fn test_global_tier_caps_all_api_traffic() {
    let server = common::spawn_test_server_with(|config| {
        config.rate_limit.enabled = true;
        config.rate_limit.global = RateLimitTier {
            max_requests: 3,
            window_secs: 900,
        };
    })
    .await
    .unwrap();

    for _ in 0..3 {
        let response = server
            .client
            .get(server.api("/exercises"))
            .send()
            .await
            .unwrap();
        // 401 (no token) still counts against the window
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = server
        .client
        .get(server.api("/exercises"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Too many requests from this IP, please try again after 15 minutes"
    );

    // /health sits outside the /api tree and stays reachable
    let response = server
        .client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_disabled_limiting_never_throttles() {
    let server = common::spawn_test_server().await.unwrap();

    for _ in 0..30 {
        let response = server
            .client
            .get(server.api("/exercises"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
