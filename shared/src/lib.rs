//! Users Service Shared Library
//!
//! Request/response types, models and error types used by the backend
//! and by clients of the HTTP API.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Role, User};
pub use types::*;
