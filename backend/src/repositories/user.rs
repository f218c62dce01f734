//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use users_service_shared::User;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            email: record.email,
            password_hash: record.password_hash,
            first_name: record.first_name,
            last_name: record.last_name,
            role_id: record.role_id,
            created_at: record.created_at,
        }
    }
}

/// Input for inserting a user
#[derive(Debug, Clone)]
pub struct CreateUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role_id: i32,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a user
    ///
    /// A duplicate email surfaces as a unique violation from the database;
    /// see `db::is_unique_violation`.
    pub async fn create(pool: &PgPool, input: CreateUser<'_>) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, role_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password_hash, first_name, last_name, role_id, created_at
            "#,
        )
        .bind(input.email)
        .bind(input.password_hash)
        .bind(input.first_name)
        .bind(input.last_name)
        .bind(input.role_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// All users, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<UserRecord>> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role_id, created_at
            FROM users
            ORDER BY created_at, email
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }
}
