//! Access Control Gate.
//!
//! Turns an `Authorization` header into an [`Identity`] by running a fixed
//! sequence of checks. Each step either yields the input for the next one or
//! stops the request with an [`AuthError`]:
//!
//! 1. header present
//! 2. header is exactly `Bearer <token>`
//! 3. token signature and expiry
//! 4. account still exists
//! 5. account is active
//!
//! Role policies are applied afterwards with [`AccessGate::authorize`].

use std::sync::Arc;

use super::{AuthError, RolePolicy, SessionClaims, TokenService};
use crate::db::{Account, AccountDirectory, Role};

/// The authenticated caller attached to a request.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Account ID.
    pub id: i64,
    /// Account email.
    pub email: String,
    /// Current role of the account (not the role in the token).
    pub role: Role,
    /// The account as loaded for this request.
    pub account: Account,
}

impl Identity {
    /// Build an identity from a freshly loaded account.
    pub fn from_account(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            account,
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The value must split on a single space into exactly two parts, the
/// first being literally `Bearer`.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;

    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Per-request authentication and authorization pipeline.
#[derive(Clone)]
pub struct AccessGate {
    tokens: Arc<TokenService>,
    directory: Arc<dyn AccountDirectory>,
}

impl AccessGate {
    /// Create a gate over a token service and an account directory.
    pub fn new(tokens: Arc<TokenService>, directory: Arc<dyn AccountDirectory>) -> Self {
        Self { tokens, directory }
    }

    /// The token service used by this gate.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// The account directory used by this gate.
    pub fn directory(&self) -> &dyn AccountDirectory {
        self.directory.as_ref()
    }

    /// Authenticate a request from its `Authorization` header value.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        let token = extract_bearer(header)?;
        let claims = self.validate(token)?;
        let account = self.load_account(&claims).await?;

        if !account.is_active {
            tracing::info!(account_id = account.id, "Rejected request from inactive account");
            return Err(AuthError::AccountInactive);
        }

        Ok(Identity::from_account(account))
    }

    /// Apply a role policy to an authenticated identity.
    pub fn authorize(&self, identity: &Identity, policy: RolePolicy) -> Result<(), AuthError> {
        policy.check(identity.role).map_err(|e| {
            tracing::debug!(
                account_id = identity.id,
                role = %identity.role,
                "Role policy rejected: {}",
                policy
            );
            e
        })
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.tokens.validate(token).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            e
        })
    }

    async fn load_account(&self, claims: &SessionClaims) -> Result<Account, AuthError> {
        match self.directory.find_by_id(claims.sub).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => {
                tracing::debug!(account_id = claims.sub, "Token subject not found");
                Err(AuthError::AccountNotFound)
            }
            Err(e) => {
                tracing::error!("Account lookup failed: {}", e);
                Err(AuthError::Directory(e.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
