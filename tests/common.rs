// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, auth, and HTTP server spawning helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `liftlog`
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use liftlog::auth::{generate_jwt_secret, AuthManager};
use liftlog::config::{AuthConfig, RateLimitConfig, ServerConfig};
use liftlog::database::Database;
use liftlog::models::{User, UserRole};
use liftlog::repositories::UserRepository;
use liftlog::routes::{router, ServerContext};
use std::net::SocketAddr;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    Ok(Arc::new(Database::new("sqlite::memory:").await?))
}

/// Test authentication manager with a fresh random secret
pub fn create_test_auth_manager() -> Arc<AuthManager> {
    Arc::new(AuthManager::new(generate_jwt_secret().to_vec(), 24))
}

/// Test configuration with rate limiting disabled
pub fn create_test_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".into(),
        base_url: base_url.into(),
        auth: AuthConfig {
            jwt_secret: generate_jwt_secret().to_vec(),
            jwt_expiry_hours: 24,
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        },
    }
}

/// A running test server with everything tests need to talk to it
pub struct TestServer {
    /// Base URL of the server, e.g. `http://127.0.0.1:49152`
    pub base_url: String,
    /// Database behind the server, for seeding fixtures
    pub database: Arc<Database>,
    /// Token signer matching the server's secret
    pub auth_manager: Arc<AuthManager>,
    /// HTTP client
    pub client: reqwest::Client,
}

impl TestServer {
    /// URL for a path under `/api`
    pub fn api(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }
}

/// Spawn the full HTTP server on an ephemeral port, rate limiting disabled
pub async fn spawn_test_server() -> Result<TestServer> {
    spawn_test_server_with(|_| {}).await
}

/// Spawn the server after letting the caller adjust the configuration
pub async fn spawn_test_server_with(adjust: impl FnOnce(&mut ServerConfig)) -> Result<TestServer> {
    init_test_logging();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let base_url = format!("http://{addr}");

    let mut config = create_test_config(&base_url);
    adjust(&mut config);

    let database = Arc::new(Database::new("sqlite::memory:").await?);
    let auth_manager = Arc::new(AuthManager::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiry_hours,
    ));

    let ctx = ServerContext::new(config, (*database).clone());
    let app = router(ctx);
    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });

    Ok(TestServer {
        base_url,
        database,
        auth_manager,
        client: reqwest::Client::new(),
    })
}

/// Seed a user directly into the database and return it with a valid token
pub async fn seed_user(server: &TestServer, role: UserRole) -> Result<(User, String)> {
    let user = User::new(
        Uuid::new_v4(),
        format!("{role} tester"),
        format!("{role}-{}@example.com", Uuid::new_v4()),
        AuthManager::hash_password("hunter22")?,
        role,
        chrono::Utc::now(),
    )?;
    UserRepository::create(server.database.as_ref(), &user).await?;
    let token = server.auth_manager.generate_token(&user)?;
    Ok((user, token))
}
