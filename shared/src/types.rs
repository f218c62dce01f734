//! API request and response types

use crate::errors::FieldError;
use crate::models::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Value of the `status` field on successful responses
pub const STATUS_SUCCESS: &str = "success";
/// Value of the `status` field on failed responses
pub const STATUS_FAIL: &str = "fail";

/// Registration request
///
/// Missing fields deserialize as empty strings so they surface as
/// validation errors instead of body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 255, message = "Email must be 1 to 255 characters"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: String,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register/login response carrying a freshly minted token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: String,
    pub message: String,
    pub auth_token: String,
}

impl AuthResponse {
    pub fn success(message: impl Into<String>, auth_token: String) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            auth_token,
        }
    }
}

/// Plain `{status, message}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl FailResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAIL.to_string(),
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

/// `GET /auth/status` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub data: UserProfile,
}

impl StatusResponse {
    pub fn success(data: UserProfile) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data,
        }
    }
}

/// Public view of a user (everything but the credential)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: i32,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        let admin = user.role().is_admin();
        Self {
            id: user.id.to_string(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role_id: user.role_id,
            admin,
            created_at: user.created_at,
        }
    }
}
