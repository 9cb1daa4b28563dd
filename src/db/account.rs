//! Account model for Aloion.
//!
//! This module defines the Account struct and the closed Role enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Account role.
///
/// Stored and transmitted as `learner`, `instructor` or `administrator`.
/// The legacy names `student`, `teacher` and `admin` are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolls in courses and sits exams.
    #[default]
    #[serde(alias = "student")]
    Learner,
    /// Authors courses and exams, records results.
    #[serde(alias = "teacher")]
    Instructor,
    /// Full access.
    #[serde(alias = "admin")]
    Administrator,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Learner => "learner",
            Role::Instructor => "instructor",
            Role::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "learner" | "student" => Ok(Role::Learner),
            "instructor" | "teacher" => Ok(Role::Instructor),
            "administrator" | "admin" => Ok(Role::Administrator),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// A registered account.
///
/// The password hash is never serialized and never printed by `Debug`.
#[derive(Clone, Serialize)]
pub struct Account {
    /// Unique account ID.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email (unique, case-insensitive).
    pub email: String,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Password hash.
    #[serde(skip_serializing)]
    pub password: String,
    /// Account role.
    pub role: Role,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

impl Account {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if this account is an administrator.
    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("is_verified", &self.is_verified)
            .finish_non_exhaustive()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Account {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        let role = role
            .parse::<Role>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: e.into(),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            password: row.try_get("password")?,
            role,
            is_active: row.try_get("is_active")?,
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Password hash (must already be hashed).
    pub password: String,
    /// Account role (defaults to Learner).
    pub role: Role,
}

impl NewAccount {
    /// Create a new account with the required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            password: password.into(),
            role: Role::Learner,
        }
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Data for updating an existing account.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New password hash.
    pub password: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New phone number.
    pub phone: Option<Option<String>>,
    /// New role.
    pub role: Option<Role>,
    /// New active status.
    pub is_active: Option<bool>,
    /// New verified status.
    pub is_verified: Option<bool>,
}

impl AccountUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new password hash.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set new names.
    pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// Set new phone number.
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Set new role.
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set active status.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Set verified status.
    pub fn is_verified(mut self, is_verified: bool) -> Self {
        self.is_verified = Some(is_verified);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
            && self.is_verified.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            password: "$argon2id$secret-hash".to_string(),
            role: Role::Instructor,
            is_active: true,
            is_verified: false,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("learner").unwrap(), Role::Learner);
        assert_eq!(Role::from_str("instructor").unwrap(), Role::Instructor);
        assert_eq!(Role::from_str("administrator").unwrap(), Role::Administrator);
        assert_eq!(Role::from_str("ADMINISTRATOR").unwrap(), Role::Administrator);
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_role_legacy_names() {
        assert_eq!(Role::from_str("student").unwrap(), Role::Learner);
        assert_eq!(Role::from_str("teacher").unwrap(), Role::Instructor);
        assert_eq!(Role::from_str("admin").unwrap(), Role::Administrator);
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrator\""
        );
        let role: Role = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, Role::Instructor);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn test_role_display_and_default() {
        assert_eq!(format!("{}", Role::Instructor), "instructor");
        assert_eq!(Role::default(), Role::Learner);
    }

    #[test]
    fn test_account_serialization_skips_password() {
        let account = sample_account();
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["role"], "instructor");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_account_debug_hides_password() {
        let account = sample_account();
        let debug = format!("{:?}", account);
        assert!(debug.contains("ada@example.com"));
        assert!(!debug.contains("secret-hash"));
    }

    #[test]
    fn test_account_helpers() {
        let account = sample_account();
        assert_eq!(account.full_name(), "Ada Lovelace");
        assert!(!account.is_administrator());

        let admin = Account {
            role: Role::Administrator,
            ..account
        };
        assert!(admin.is_administrator());
    }

    #[test]
    fn test_new_account_builder() {
        let account = NewAccount::new("Ada", "Lovelace", "ada@example.com", "hash")
            .with_phone("555-0100")
            .with_role(Role::Instructor);

        assert_eq!(account.first_name, "Ada");
        assert_eq!(account.email, "ada@example.com");
        assert_eq!(account.phone, Some("555-0100".to_string()));
        assert_eq!(account.role, Role::Instructor);
    }

    #[test]
    fn test_account_update_builder() {
        let update = AccountUpdate::new()
            .role(Role::Administrator)
            .is_active(false);

        assert!(update.role.is_some());
        assert!(update.is_active.is_some());
        assert!(update.password.is_none());
        assert!(!update.is_empty());
        assert!(AccountUpdate::new().is_empty());
    }
}
