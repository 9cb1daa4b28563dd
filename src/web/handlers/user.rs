//! Account listing handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::db::AccountRepository;
use crate::web::dto::{AccountResponse, ListUsersQuery, PaginatedResponse};
use crate::web::error::ApiError;

/// GET /api/v1/users - List accounts (administrators only).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<PaginatedResponse<AccountResponse>>, ApiError> {
    let (limit, offset) = query.to_limit_offset();

    let repo = AccountRepository::new(state.db.pool());
    let total = repo.count().await?;
    let accounts = repo.list(limit, offset).await?;

    let data = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, limit, offset, total)))
}
