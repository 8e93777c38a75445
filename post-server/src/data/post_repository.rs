use crate::domain::error::DomainError;
use crate::domain::post::Post;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

/// Entity store contract. `save` assigns id and timestamp on first save
/// and preserves both on every later save; `delete` expects the post to
/// be currently stored.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError>;
    async fn save(&self, post: Post) -> Result<Post, DomainError>;
    async fn delete(&self, post: &Post) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, timestamp
            FROM post WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn save(&self, post: Post) -> Result<Post, DomainError> {
        let stored = match post.id {
            // First save: the database assigns id and timestamp.
            None => sqlx::query_as::<_, Post>(
                r#"
                INSERT INTO post (title, content)
                VALUES ($1, $2)
                RETURNING id, title, content, timestamp
                "#,
            )
            .bind(&post.title)
            .bind(&post.content)
            .fetch_one(&self.pool)
            .await,
            // Re-save: only the mutable fields are written.
            Some(id) => sqlx::query_as::<_, Post>(
                r#"
                UPDATE post
                SET title = $1, content = $2
                WHERE id = $3
                RETURNING id, title, content, timestamp
                "#,
            )
            .bind(&post.title)
            .bind(&post.content)
            .bind(id)
            .fetch_one(&self.pool)
            .await,
        }
        .map_err(|e| {
            error!("failed to save post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = ?stored.id, "post saved");
        Ok(stored)
    }

    async fn delete(&self, post: &Post) -> Result<(), DomainError> {
        let id = post
            .id
            .ok_or_else(|| DomainError::Internal("cannot delete an unsaved post".into()))?;

        sqlx::query("DELETE FROM post WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(post_id = %id, "post deleted");
        Ok(())
    }
}
