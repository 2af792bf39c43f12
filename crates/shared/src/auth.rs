//! Resolved authentication context.
//!
//! Token verification and role gating happen in the (external) HTTP
//! middleware; by the time the core is invoked the caller has already been
//! resolved to an [`AuthContext`], which the core trusts.

use serde::{Deserialize, Serialize};

/// User role as recorded in the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Administrator - may create and mutate fund requests.
    Admin,
    /// Super administrator - full access.
    #[serde(rename = "Super_Admin")]
    SuperAdmin,
    /// Regular user - read-only access.
    User,
}

impl Role {
    /// Returns true if this role may create or mutate fund requests.
    #[must_use]
    pub const fn can_manage_requests(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::SuperAdmin => write!(f, "Super_Admin"),
            Self::User => write!(f, "User"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Super_Admin" => Ok(Self::SuperAdmin),
            "User" => Ok(Self::User),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// The already-authenticated actor on whose behalf an operation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// The actor's user id.
    pub actor_id: i64,
    /// The actor's email, used in audit descriptions.
    pub actor_email: String,
    /// The actor's role.
    pub role: Role,
}

impl AuthContext {
    /// Creates a new auth context.
    #[must_use]
    pub fn new(actor_id: i64, actor_email: impl Into<String>, role: Role) -> Self {
        Self {
            actor_id,
            actor_email: actor_email.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(Role::Admin, "Admin")]
    #[case(Role::SuperAdmin, "Super_Admin")]
    #[case(Role::User, "User")]
    fn test_role_round_trip(#[case] role: Role, #[case] text: &str) {
        assert_eq!(role.to_string(), text);
        assert_eq!(Role::from_str(text).unwrap(), role);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Role::from_str("Intern").is_err());
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_manage_requests());
        assert!(Role::SuperAdmin.can_manage_requests());
        assert!(!Role::User.can_manage_requests());
    }

    #[test]
    fn test_super_admin_serde_rename() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"Super_Admin\"");
    }
}
