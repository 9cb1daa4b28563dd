//! Account repository for Aloion.
//!
//! This module provides CRUD operations for accounts in the database.

use sqlx::QueryBuilder;

use super::account::{Account, AccountUpdate, NewAccount};
use super::DbPool;
use crate::{AloionError, Result};

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, email, phone, password, role,
                               is_active, is_verified, created_at";

/// Repository for account CRUD operations.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new account in the database.
    ///
    /// Returns `AloionError::Conflict` if the email is already registered.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let result = sqlx::query(
            "INSERT INTO accounts (first_name, last_name, email, phone, password, role)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_account.first_name)
        .bind(&new_account.last_name)
        .bind(&new_account.email)
        .bind(&new_account.phone)
        .bind(&new_account.password)
        .bind(new_account.role.as_str())
        .execute(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AloionError::Conflict("account".to_string())
            }
            other => AloionError::from(other),
        })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AloionError::NotFound("account".to_string()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?");
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(account)
    }

    /// Get an account by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ? COLLATE NOCASE");
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(email.trim())
            .fetch_optional(self.pool)
            .await?;
        Ok(account)
    }

    /// Check if an email is already registered (case-insensitive).
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = ? COLLATE NOCASE")
                .bind(email.trim())
                .fetch_one(self.pool)
                .await?;
        Ok(count > 0)
    }

    /// List accounts ordered by ID.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id LIMIT ? OFFSET ?");
        let accounts = sqlx::query_as::<_, Account>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;
        Ok(accounts)
    }

    /// Count all accounts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Update an account by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated account, or None if not found.
    pub async fn update(&self, id: i64, update: &AccountUpdate) -> Result<Option<Account>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("UPDATE accounts SET updated_at = datetime('now')");

        if let Some(ref password) = update.password {
            query.push(", password = ");
            query.push_bind(password.clone());
        }
        if let Some(ref first_name) = update.first_name {
            query.push(", first_name = ");
            query.push_bind(first_name.clone());
        }
        if let Some(ref last_name) = update.last_name {
            query.push(", last_name = ");
            query.push_bind(last_name.clone());
        }
        if let Some(ref phone) = update.phone {
            query.push(", phone = ");
            query.push_bind(phone.clone());
        }
        if let Some(role) = update.role {
            query.push(", role = ");
            query.push_bind(role.as_str());
        }
        if let Some(is_active) = update.is_active {
            query.push(", is_active = ");
            query.push_bind(is_active);
        }
        if let Some(is_verified) = update.is_verified {
            query.push(", is_verified = ");
            query.push_bind(is_verified);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, Role};

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount::new("Test", "User", email, "hash")
    }

    #[tokio::test]
    async fn test_create_account() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        let account = repo
            .create(&new_account("learner@example.com").with_phone("555-0100"))
            .await
            .unwrap();

        assert!(account.id > 0);
        assert_eq!(account.email, "learner@example.com");
        assert_eq!(account.phone, Some("555-0100".to_string()));
        assert_eq!(account.role, Role::Learner);
        assert!(account.is_active);
        assert!(!account.is_verified);
        assert!(!account.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        repo.create(&new_account("dup@example.com")).await.unwrap();
        let result = repo.create(&new_account("DUP@example.com")).await;

        assert!(matches!(result, Err(AloionError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        let created = repo
            .create(&new_account("a@example.com").with_role(Role::Instructor))
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@example.com");
        assert_eq!(found.role, Role::Instructor);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_email_case_insensitive() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        repo.create(&new_account("Mixed@Example.com")).await.unwrap();

        assert!(repo.get_by_email("mixed@example.com").await.unwrap().is_some());
        assert!(repo.get_by_email(" MIXED@EXAMPLE.COM ").await.unwrap().is_some());
        assert!(repo.get_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_exists() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        assert!(!repo.email_exists("x@example.com").await.unwrap());
        repo.create(&new_account("x@example.com")).await.unwrap();
        assert!(repo.email_exists("X@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        for i in 0..5 {
            repo.create(&new_account(&format!("user{i}@example.com")))
                .await
                .unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 5);

        let page = repo.list(2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "user0@example.com");

        let page = repo.list(2, 4).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].email, "user4@example.com");
    }

    #[tokio::test]
    async fn test_update_account() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        let account = repo.create(&new_account("u@example.com")).await.unwrap();

        let update = AccountUpdate::new()
            .role(Role::Administrator)
            .is_active(false)
            .is_verified(true)
            .name("New", "Name");
        let updated = repo.update(account.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.role, Role::Administrator);
        assert!(!updated.is_active);
        assert!(updated.is_verified);
        assert_eq!(updated.full_name(), "New Name");
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let db = setup().await;
        let repo = AccountRepository::new(db.pool());

        let update = AccountUpdate::new().is_active(false);
        assert!(repo.update(42, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_legacy_role_rows_load() {
        let db = setup().await;
        sqlx::query(
            "INSERT INTO accounts (first_name, last_name, email, password, role)
             VALUES ('Old', 'Admin', 'old@example.com', 'hash', 'admin')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let repo = AccountRepository::new(db.pool());
        let account = repo.get_by_email("old@example.com").await.unwrap().unwrap();
        assert_eq!(account.role, Role::Administrator);
    }
}
