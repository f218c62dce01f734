//! Data models for the users service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role stored in `users.role_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const USER_ID: i32 = 1;
    pub const ADMIN_ID: i32 = 2;

    /// Map a stored role id. Unknown ids are treated as regular users.
    pub fn from_id(role_id: i32) -> Self {
        match role_id {
            Self::ADMIN_ID => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Role::User => Self::USER_ID,
            Role::Admin => Self::ADMIN_ID,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_id(self.role_id)
    }
}
