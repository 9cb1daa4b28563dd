//! Request DTOs for the HTTP API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, password_policy, person_name};
use crate::db::Role;

/// Default page size for account listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum page size for account listings.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Given name.
    #[validate(
        length(min = 1, max = 100, message = "First name must be 1-100 characters"),
        custom(function = "person_name")
    )]
    pub first_name: String,
    /// Family name.
    #[validate(
        length(min = 1, max = 100, message = "Last name must be 1-100 characters"),
        custom(function = "person_name")
    )]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Phone number (optional).
    #[serde(default)]
    #[validate(
        length(max = 32, message = "Phone must be at most 32 characters"),
        custom(function = "no_control_chars")
    )]
    pub phone: Option<String>,
    /// Password.
    #[validate(custom(function = "password_policy"))]
    pub password: String,
    /// Requested role (defaults to learner).
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Query parameters for account listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Page size (default 20, max 100).
    pub limit: Option<i64>,
    /// Number of rows to skip.
    pub offset: Option<i64>,
}

impl ListUsersQuery {
    /// Resolve to a clamped `(limit, offset)` pair.
    pub fn to_limit_offset(&self) -> (i64, i64) {
        let limit = match self.limit {
            Some(limit) if limit > 0 => limit.min(MAX_PAGE_LIMIT),
            _ => DEFAULT_PAGE_LIMIT,
        };
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}
