//! Middleware for the HTTP API.

pub mod auth;
pub mod cors;

pub use auth::{require_auth, require_role, CurrentUser};
pub use cors::create_cors_layer;
