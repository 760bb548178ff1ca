use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{Role, SessionUser, UserStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Shared response shape of /auth/register and /auth/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub user_id: i64,
}

impl AuthResponse {
    pub fn into_parts(self) -> (SessionUser, String) {
        let user = SessionUser {
            user_id: self.user_id,
            email: self.email,
            full_name: self.full_name,
            role: self.role,
            status: self.status,
        };
        (user, self.token)
    }
}
