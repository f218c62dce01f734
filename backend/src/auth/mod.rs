//! Authentication module
//!
//! JWT minting/verification, bearer header extraction and argon2
//! password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{check_live, Claims, JwtService};
pub use middleware::{parse_bearer, BearerToken};
pub use password::PasswordService;
