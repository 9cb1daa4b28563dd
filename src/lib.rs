//! Aloion - authentication and authorization core for an e-learning backend.
//!
//! Provides credential hashing, signed session tokens, a per-request
//! access-control gate with role policies, and the account store and HTTP
//! API built on top of them.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    can_modify_resource, hash_password, validate_password, verify_password, AccessGate,
    AuthError, Identity, PasswordError, RolePolicy, SessionClaims, TokenService,
};
pub use config::Config;
pub use db::{
    Account, AccountDirectory, AccountRepository, AccountUpdate, Database, NewAccount, Role,
    SqlAccountDirectory,
};
pub use error::{AloionError, Result};
pub use web::WebServer;
