use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Recruiter,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "STUDENT"),
            Role::Recruiter => write!(f, "RECRUITER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Pending,
    Approved,
    Blocked,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Pending => write!(f, "PENDING"),
            UserStatus::Approved => write!(f, "APPROVED"),
            UserStatus::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// A user record as the admin endpoints return it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
}

/// The authenticated identity held for the lifetime of a login session.
/// Immutable once established; a role change requires re-authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
}

impl SessionUser {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
