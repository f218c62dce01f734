//! Business logic services
//!
//! Services validate input, coordinate repositories and the token codec,
//! and translate storage failures into `ApiError`s.

pub mod auth;
pub mod user;

pub use auth::AuthService;
pub use user::UserService;
