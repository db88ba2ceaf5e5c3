//! MySQL implementation of the TokenVersionRepository trait.
//!
//! The counter lives in `users.token_version` (see
//! `migrations/001_add_token_version.sql`).

use async_trait::async_trait;
use sqlx::MySqlPool;

use ext_core::errors::{DomainError, DomainResult};
use ext_core::repositories::TokenVersionRepository;

/// MySQL implementation of TokenVersionRepository
pub struct MySqlTokenVersionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenVersionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenVersionRepository for MySqlTokenVersionRepository {
    async fn current_version(&self, user_id: &str) -> DomainResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT token_version FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read token version: {}", e),
            })
    }

    async fn increment_version(&self, user_id: &str) -> DomainResult<i64> {
        // LAST_INSERT_ID(expr) hands the new value back on the same connection,
        // so read and write are one atomic statement.
        let result = sqlx::query(
            "UPDATE users SET token_version = LAST_INSERT_ID(token_version + 1) WHERE id = ?",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to increment token version: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user_id),
            });
        }

        Ok(result.last_insert_id() as i64)
    }
}
