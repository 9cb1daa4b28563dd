//! HTTP API for Aloion.
//!
//! Exposes registration, login and account endpoints under `/api/v1`,
//! protected by the access-control gate.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{authenticated, create_router, gated};
pub use server::WebServer;
