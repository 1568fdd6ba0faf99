use crate::domain::error::DomainError;
use crate::domain::follow::Follow;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Inserts the edge unless `(user_id, author_id)` already exists.
    /// Returns whether a row was written.
    async fn create(&self, follow: Follow) -> Result<bool, DomainError>;
    /// Returns whether an edge was removed.
    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError>;
    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError>;
    /// Edges owned by `user_id`, oldest first.
    async fn follows_of(&self, user_id: Uuid) -> Result<Vec<Follow>, DomainError>;
    async fn count_followers(&self, author_id: Uuid) -> Result<usize, DomainError>;
}

#[derive(Clone)]
pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn create(&self, follow: Follow) -> Result<bool, DomainError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO follows (id, user_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT unique_subscription DO NOTHING
            "#,
        )
        .bind(follow.id)
        .bind(follow.user_id)
        .bind(follow.author_id)
        .bind(follow.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create follow: {}", e);
            DomainError::from(e)
        })?;

        let created = inserted.rows_affected() > 0;
        if created {
            info!(user_id = %follow.user_id, author_id = %follow.author_id, "follow created");
        }
        Ok(created)
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND author_id = $2")
            .bind(user_id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete follow: {}", e);
                DomainError::from(e)
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(user_id = %user_id, author_id = %author_id, "follow removed");
        }
        Ok(removed)
    }

    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::from)
    }

    async fn follows_of(&self, user_id: Uuid) -> Result<Vec<Follow>, DomainError> {
        sqlx::query_as::<_, Follow>(
            r#"
            SELECT id, user_id, author_id, created
            FROM follows
            WHERE user_id = $1
            ORDER BY created, seq
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching follows of {}: {}", user_id, e);
            DomainError::from(e)
        })
    }

    async fn count_followers(&self, author_id: Uuid) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::from)?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}
