//! Session token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying the account id, email and role. They are
//! self-verifying: nothing is stored server-side, so a token stays valid
//! until it expires.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::AuthConfig;
use crate::db::Role;

/// The only accepted signing algorithm.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Longest token lifetime that may be requested, in hours (one year).
pub const MAX_TTL_HOURS: u32 = 24 * 365;

/// Decoded session token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account ID).
    pub sub: i64,
    /// Account email at issuance.
    pub email: String,
    /// Account role at issuance.
    pub role: Role,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expires-at, unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    /// Whether the token is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Issues and validates signed session tokens.
///
/// Built once from the auth configuration and shared read-only afterwards.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl_hours: u32,
}

impl TokenService {
    /// Create a token service from configuration.
    ///
    /// Fails with [`AuthError::NotInitialized`] if the signing secret is empty.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.jwt_secret.is_empty() {
            return Err(AuthError::NotInitialized);
        }
        let secret = config.jwt_secret.as_bytes();

        // Expiry is checked against an explicit clock in validate_at.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_ttl_hours: config.token_expiry_hours,
        })
    }

    /// Token lifetime configured as the default, in hours.
    pub fn default_ttl_hours(&self) -> u32 {
        self.default_ttl_hours
    }

    /// Issue a token valid for `ttl_hours` from now.
    pub fn issue(
        &self,
        subject_id: i64,
        email: &str,
        role: Role,
        ttl_hours: u32,
    ) -> Result<String, AuthError> {
        self.issue_at(subject_id, email, role, ttl_hours, Utc::now())
    }

    /// Issue a token valid for `ttl_hours` from `now`.
    ///
    /// `ttl_hours` must be in `1..=MAX_TTL_HOURS`, and the expiry must be
    /// representable; otherwise [`AuthError::InvalidTtl`] is returned.
    pub fn issue_at(
        &self,
        subject_id: i64,
        email: &str,
        role: Role,
        ttl_hours: u32,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        if ttl_hours == 0 || ttl_hours > MAX_TTL_HOURS {
            return Err(AuthError::InvalidTtl);
        }
        let expires_at = Duration::try_hours(i64::from(ttl_hours))
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AuthError::InvalidTtl)?;

        let claims = SessionClaims {
            sub: subject_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {}", e);
            AuthError::MalformedToken
        })
    }

    /// Validate a token against the current time.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against `now`.
    ///
    /// The signature and algorithm are checked before expiry, so a tampered
    /// token is reported as [`AuthError::SignatureInvalid`] even when expired.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(&e))?;

        if data.claims.is_expired_at(now) {
            return Err(AuthError::Expired);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("default_ttl_hours", &self.default_ttl_hours)
            .finish_non_exhaustive()
    }
}

fn classify(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::SignatureInvalid,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::MalformedToken,
    }
}
