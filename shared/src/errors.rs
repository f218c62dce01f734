//! Error types shared between the service and its clients

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bearer token failures
///
/// The `Display` text is the user-facing message returned in the
/// `message` field of a failed response.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Provide a valid auth token.")]
    MissingToken,

    #[error("Bearer token malformed.")]
    Malformed,

    #[error("Invalid token. Please log in again.")]
    InvalidSignature,

    #[error("Signature expired. Please log in again.")]
    Expired,

    #[error("Token blacklisted. Please log in again.")]
    Blacklisted,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
