//! Shared helpers for HTTP API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use aloion::config::AuthConfig;
use aloion::web::{create_router, AppState};
use aloion::{hash_password, AccountRepository, AccountUpdate, Database, NewAccount, Role};
use axum_test::TestServer;
use serde_json::{json, Value};

/// Signing secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Password given to accounts created with [`create_account`].
pub const TEST_PASSWORD: &str = "password123";

/// Create the auth configuration used by tests.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_expiry_hours: 24,
    }
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let state = Arc::new(AppState::new(db, &test_auth_config()).expect("Failed to create state"));

    let router = create_router(state.clone(), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, state)
}

/// Insert an account directly and return its ID.
///
/// Used for roles that cannot self-register.
pub async fn create_account(state: &AppState, email: &str, role: Role) -> i64 {
    let hash = hash_password(TEST_PASSWORD).expect("Failed to hash password");
    AccountRepository::new(state.db.pool())
        .create(&NewAccount::new("Test", "User", email, hash).with_role(role))
        .await
        .expect("Failed to create account")
        .id
}

/// Deactivate an account.
pub async fn deactivate(state: &AppState, id: i64) {
    AccountRepository::new(state.db.pool())
        .update(id, &AccountUpdate::new().is_active(false))
        .await
        .expect("Failed to deactivate account");
}

/// Log in and return the session token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["data"]["token"]
        .as_str()
        .expect("token missing from login response")
        .to_string()
}

/// Format a bearer `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
