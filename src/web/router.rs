//! Router configuration for the HTTP API.

use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::dto::HealthResponse;
use super::handlers::{list_users, login, me, register, AppState};
use super::middleware::{create_cors_layer, require_auth, require_role};
use crate::auth::RolePolicy;

/// Require authentication on every route of `router`.
pub fn authenticated(
    router: Router<Arc<AppState>>,
    state: Arc<AppState>,
) -> Router<Arc<AppState>> {
    router.route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// Require authentication and a role policy on every route of `router`.
///
/// The role check runs after the identity has been established.
pub fn gated(
    router: Router<Arc<AppState>>,
    state: Arc<AppState>,
    policy: RolePolicy,
) -> Router<Arc<AppState>> {
    let router = router.route_layer(middleware::from_fn(move |req: Request, next: Next| {
        require_role(policy, req, next)
    }));
    authenticated(router, state)
}

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Auth routes (no authentication required)
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let account_routes = authenticated(
        Router::new().route("/users/me", get(me)),
        app_state.clone(),
    );

    let admin_routes = gated(
        Router::new().route("/users", get(list_users)),
        app_state.clone(),
        RolePolicy::AdministratorOnly,
    );

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes)
        .merge(account_routes)
        .merge(admin_routes);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
