//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{
    hash_password, verify_dummy_password, verify_password, AccessGate, AuthError, TokenService,
};
use crate::config::AuthConfig;
use crate::db::{Account, AccountRepository, Database, NewAccount, Role, SqlAccountDirectory};
use crate::web::dto::{
    AccountResponse, ApiResponse, AuthResponse, LoginRequest, RegisterRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Database,
    /// Token issuance and validation.
    pub tokens: Arc<TokenService>,
    /// Per-request authentication pipeline.
    pub gate: AccessGate,
}

impl AppState {
    /// Create the application state.
    ///
    /// Fails if the signing secret is not configured.
    pub fn new(db: Database, auth: &AuthConfig) -> Result<Self, AuthError> {
        let tokens = Arc::new(TokenService::new(auth)?);
        let directory = Arc::new(SqlAccountDirectory::new(db.pool().clone()));
        let gate = AccessGate::new(tokens.clone(), directory);

        Ok(Self { db, tokens, gate })
    }

    /// Issue a session token for an account with the default lifetime.
    fn issue_session(&self, account: Account) -> Result<AuthResponse, ApiError> {
        let ttl_hours = self.tokens.default_ttl_hours();
        let token = self
            .tokens
            .issue(account.id, &account.email, account.role, ttl_hours)?;

        Ok(AuthResponse {
            token,
            expires_in: u64::from(ttl_hours) * 3600,
            user: AccountResponse::from(account),
        })
    }
}

/// POST /api/v1/auth/register - Create an account and start a session.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let role = req.role.unwrap_or_default();
    if role == Role::Administrator {
        return Err(ApiError::invalid_field(
            "role",
            "Administrator accounts cannot be self-registered",
        ));
    }

    let email = req.email.trim();
    let repo = AccountRepository::new(state.db.pool());
    if repo.email_exists(email).await? {
        return Err(ApiError::conflict("Email is already registered"));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal()
    })?;

    let mut new_account = NewAccount::new(
        req.first_name.trim(),
        req.last_name.trim(),
        email,
        password_hash,
    )
    .with_role(role);
    if let Some(phone) = req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        new_account = new_account.with_phone(phone);
    }

    let account = repo.create(&new_account).await?;
    tracing::info!(account_id = account.id, role = %account.role, "Account registered");

    let response = state.issue_session(account)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// POST /api/v1/auth/login - Start a session with email and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let Some(account) = state.gate.directory().find_by_email(req.email.trim()).await? else {
        verify_dummy_password(&req.password);
        tracing::debug!("Login rejected: unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&req.password, &account.password) {
        tracing::debug!(account_id = account.id, "Login rejected: wrong password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if !account.is_active {
        return Err(ApiError::forbidden("Account is disabled"));
    }

    tracing::info!(account_id = account.id, "Login succeeded");
    Ok(Json(ApiResponse::new(state.issue_session(account)?)))
}

/// GET /api/v1/users/me - The authenticated account.
pub async fn me(CurrentUser(identity): CurrentUser) -> Json<ApiResponse<AccountResponse>> {
    Json(ApiResponse::new(AccountResponse::from(identity.account)))
}
