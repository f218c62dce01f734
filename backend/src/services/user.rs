//! User listing

use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::PgPool;
use users_service_shared::{User, UserProfile};

pub struct UserService;

impl UserService {
    /// Public profiles of every registered user
    ///
    /// No authorization guard is applied.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserProfile>, ApiError> {
        let users = UserRepository::list_all(pool).await?;
        Ok(users
            .into_iter()
            .map(|record| UserProfile::from(User::from(record)))
            .collect())
    }
}
