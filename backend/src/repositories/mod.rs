//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod blacklist;
pub mod user;

pub use blacklist::BlacklistRepository;
pub use user::{CreateUser, UserRecord, UserRepository};
