//! Bearer-token authentication middleware.
//!
//! [`require_auth`] runs the access gate and stores the resulting
//! [`Identity`] in the request extensions. [`require_role`] applies a role
//! policy to that identity and must be layered inside `require_auth`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{AuthError, Identity, RolePolicy};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Read the `Authorization` header as text.
///
/// A header that is present but not valid visible ASCII is malformed.
fn authorization_header(headers: &axum::http::HeaderMap) -> Result<Option<String>, AuthError> {
    match headers.get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.to_string()))
            .map_err(|_| AuthError::MalformedHeader),
    }
}

/// Middleware that authenticates the request or rejects it.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = authorization_header(request.headers())?;
    let identity = state.gate.authenticate(header.as_deref()).await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Middleware that applies a role policy to the authenticated identity.
pub async fn require_role(
    policy: RolePolicy,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request.extensions().get::<Identity>().ok_or_else(|| {
        tracing::error!("Role policy applied to a route without authentication");
        ApiError::internal()
    })?;

    policy.check(identity.role).map_err(|e| {
        tracing::debug!(
            account_id = identity.id,
            role = %identity.role,
            "Access denied: {} role required",
            policy
        );
        e
    })?;

    Ok(next.run(request).await)
}

/// Extractor for the authenticated caller.
///
/// Uses the identity stored by [`require_auth`] when present, and otherwise
/// runs the access gate itself.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(CurrentUser(identity.clone()));
        }

        let header = authorization_header(&parts.headers)?;
        let identity = state.gate.authenticate(header.as_deref()).await?;
        Ok(CurrentUser(identity))
    }
}
