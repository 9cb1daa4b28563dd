//! Authentication and authorization core for Aloion.
//!
//! This module provides credential hashing, session tokens, the
//! access-control gate and role policies.

mod error;
pub mod gate;
mod password;
pub mod policy;
pub mod token;

pub use error::AuthError;
pub use gate::{extract_bearer, AccessGate, Identity};
pub use password::{
    hash_password, validate_password, verify_dummy_password, verify_password, PasswordError,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use policy::{can_modify_resource, RolePolicy};
pub use token::{SessionClaims, TokenService, MAX_TTL_HOURS, TOKEN_ALGORITHM};
