//! Revoked token storage
//!
//! Lookups and inserts take any Postgres executor so logout can run both
//! inside a single transaction.

use anyhow::Result;
use sqlx::{PgExecutor, PgPool};

pub struct BlacklistRepository;

impl BlacklistRepository {
    /// Whether the exact token string has been revoked
    pub async fn is_blacklisted<'e>(executor: impl PgExecutor<'e>, token: &str) -> Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM blacklist_tokens WHERE token = $1)
            "#,
        )
        .bind(token)
        .fetch_one(executor)
        .await?;

        Ok(found)
    }

    /// Revoke a token
    ///
    /// Inserting an already revoked token fails with a unique violation.
    pub async fn insert<'e>(executor: impl PgExecutor<'e>, token: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blacklist_tokens (token)
            VALUES ($1)
            "#,
        )
        .bind(token)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blacklist_tokens")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
