//! Account Directory: read-only account lookup consumed by the auth core.

use async_trait::async_trait;

use super::{Account, AccountRepository, DbPool};
use crate::Result;

/// Read-only account lookup.
///
/// The access-control gate only ever reads accounts through this trait, so
/// tests and alternative stores can plug in their own implementation.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find an account by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>>;

    /// Find an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
}

/// Account Directory backed by the SQL account table.
#[derive(Clone)]
pub struct SqlAccountDirectory {
    pool: DbPool,
}

impl SqlAccountDirectory {
    /// Create a directory over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for SqlAccountDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        AccountRepository::new(&self.pool).get_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        AccountRepository::new(&self.pool).get_by_email(email).await
    }
}
