//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role controlling which endpoints a user may exercise.
///
/// Stored and transmitted as its kebab-case name (`"pro-user"` etc.).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    User,
    ProUser,
    Surveyor,
    Admin,
}

impl Role {
    /// Wire/storage name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::ProUser => "pro-user",
            Role::Surveyor => "surveyor",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "pro-user" => Some(Role::ProUser),
            "surveyor" => Some(Role::Surveyor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    /// Defaults to [`Role::User`] when the client sends none.
    #[serde(default)]
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in [Role::User, Role::ProUser, Role::Surveyor, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn role_serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Role::ProUser).unwrap(),
            "\"pro-user\""
        );
        let parsed: Role = serde_json::from_str("\"surveyor\"").unwrap();
        assert_eq!(parsed, Role::Surveyor);
    }
}
