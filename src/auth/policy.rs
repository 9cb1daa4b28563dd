//! Role-based access policies.

use std::fmt;

use super::{AuthError, Identity};
use crate::db::Role;

/// A named set of roles permitted to reach a protected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RolePolicy {
    /// Administrators only.
    AdministratorOnly,
    /// Instructors and administrators.
    InstructorOrAdministrator,
}

impl RolePolicy {
    /// Whether `role` satisfies this policy.
    pub fn permits(&self, role: Role) -> bool {
        match self {
            RolePolicy::AdministratorOnly => match role {
                Role::Administrator => true,
                Role::Instructor | Role::Learner => false,
            },
            RolePolicy::InstructorOrAdministrator => match role {
                Role::Administrator | Role::Instructor => true,
                Role::Learner => false,
            },
        }
    }

    /// Check `role` against this policy.
    pub fn check(&self, role: Role) -> Result<(), AuthError> {
        if self.permits(role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(*self))
        }
    }
}

impl fmt::Display for RolePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolePolicy::AdministratorOnly => write!(f, "administrator"),
            RolePolicy::InstructorOrAdministrator => write!(f, "instructor or administrator"),
        }
    }
}

/// Check that `identity` may modify a resource owned by `owner_id`.
///
/// The owner and any administrator pass.
pub fn can_modify_resource(identity: &Identity, owner_id: i64) -> Result<(), AuthError> {
    if identity.id == owner_id || identity.role == Role::Administrator {
        Ok(())
    } else {
        Err(AuthError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Account;

    const ALL_ROLES: [Role; 3] = [Role::Learner, Role::Instructor, Role::Administrator];

    fn identity(id: i64, role: Role) -> Identity {
        Identity::from_account(Account {
            id,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("user{id}@example.com"),
            phone: None,
            password: String::new(),
            role,
            is_active: true,
            is_verified: false,
            created_at: "2026-01-01 00:00:00".to_string(),
        })
    }

    #[test]
    fn test_administrator_only() {
        let policy = RolePolicy::AdministratorOnly;
        let permitted: Vec<Role> = ALL_ROLES.into_iter().filter(|r| policy.permits(*r)).collect();
        assert_eq!(permitted, vec![Role::Administrator]);
    }

    #[test]
    fn test_instructor_or_administrator() {
        let policy = RolePolicy::InstructorOrAdministrator;
        let permitted: Vec<Role> = ALL_ROLES.into_iter().filter(|r| policy.permits(*r)).collect();
        assert_eq!(permitted, vec![Role::Instructor, Role::Administrator]);
    }

    #[test]
    fn test_check_returns_forbidden() {
        assert_eq!(
            RolePolicy::AdministratorOnly.check(Role::Instructor),
            Err(AuthError::Forbidden(RolePolicy::AdministratorOnly))
        );
        assert_eq!(
            RolePolicy::InstructorOrAdministrator.check(Role::Learner),
            Err(AuthError::Forbidden(RolePolicy::InstructorOrAdministrator))
        );
        assert!(RolePolicy::InstructorOrAdministrator
            .check(Role::Instructor)
            .is_ok());
    }

    #[test]
    fn test_owner_can_modify() {
        assert!(can_modify_resource(&identity(5, Role::Instructor), 5).is_ok());
    }

    #[test]
    fn test_administrator_can_modify_any() {
        assert!(can_modify_resource(&identity(1, Role::Administrator), 5).is_ok());
    }

    #[test]
    fn test_other_instructor_cannot_modify() {
        assert_eq!(
            can_modify_resource(&identity(6, Role::Instructor), 5),
            Err(AuthError::NotOwner)
        );
        assert_eq!(
            can_modify_resource(&identity(7, Role::Learner), 5),
            Err(AuthError::NotOwner)
        );
    }
}
