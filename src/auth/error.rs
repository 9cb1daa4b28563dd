//! Authentication and authorization errors.

use thiserror::Error;

use super::policy::RolePolicy;

/// Errors produced by the token service and the access-control gate.
///
/// Every variant is terminal for the request that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token service was configured without a signing secret.
    #[error("token service not initialized: signing secret is not set")]
    NotInitialized,

    /// No `Authorization` header on the request.
    #[error("authorization header required")]
    MissingHeader,

    /// `Authorization` header is not exactly `Bearer <token>`.
    #[error("invalid authorization header format")]
    MalformedHeader,

    /// Token is not a structurally valid signed token.
    #[error("malformed token")]
    MalformedToken,

    /// Token signature does not match, or it was signed with another algorithm.
    #[error("token signature invalid")]
    SignatureInvalid,

    /// Token is past its expiry time.
    #[error("token expired")]
    Expired,

    /// A token was requested with a lifetime outside the allowed range.
    #[error("token lifetime must be between 1 and {} hours", super::token::MAX_TTL_HOURS)]
    InvalidTtl,

    /// The token's subject no longer exists.
    #[error("account not found")]
    AccountNotFound,

    /// The account has been deactivated.
    #[error("account inactive")]
    AccountInactive,

    /// The account's role is outside the permitted set.
    #[error("{0} access required")]
    Forbidden(RolePolicy),

    /// The actor neither owns the resource nor is an administrator.
    #[error("only the owner or an administrator can modify this resource")]
    NotOwner,

    /// The account directory failed (cause is internal).
    #[error("account directory error: {0}")]
    Directory(String),
}

impl AuthError {
    /// Whether this is a token validation failure.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::NotInitialized
                | AuthError::MalformedToken
                | AuthError::SignatureInvalid
                | AuthError::Expired
        )
    }

    /// Whether the caller is authenticated but not allowed (HTTP 403).
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            AuthError::AccountInactive | AuthError::Forbidden(_) | AuthError::NotOwner
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::Expired.to_string(), "token expired");
        assert_eq!(
            AuthError::Forbidden(RolePolicy::AdministratorOnly).to_string(),
            "administrator access required"
        );
        assert_eq!(
            AuthError::Forbidden(RolePolicy::InstructorOrAdministrator).to_string(),
            "instructor or administrator access required"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(AuthError::Expired.is_token_error());
        assert!(AuthError::SignatureInvalid.is_token_error());
        assert!(!AuthError::MalformedHeader.is_token_error());

        assert!(AuthError::AccountInactive.is_authorization_failure());
        assert!(AuthError::NotOwner.is_authorization_failure());
        assert!(AuthError::Forbidden(RolePolicy::AdministratorOnly).is_authorization_failure());
        assert!(!AuthError::AccountNotFound.is_authorization_failure());
        assert!(!AuthError::MissingHeader.is_authorization_failure());
    }
}
