use async_trait::async_trait;
use sqlx::PgPool;

use super::unique_violation;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::user::models::UserId;

const FAVORITE_CONSTRAINT: &str = "favorites_pkey";

pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> ArticleError {
    ArticleError::DatabaseError(e.to_string())
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn insert(&self, article_id: ArticleId, user_id: UserId) -> Result<(), ArticleError> {
        sqlx::query("INSERT INTO favorites (user_id, article_id) VALUES ($1, $2)")
            .bind(user_id.0)
            .bind(article_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e) {
                Some(FAVORITE_CONSTRAINT) => ArticleError::DuplicateFavorite,
                _ => database_error(e),
            })?;

        Ok(())
    }

    async fn delete(&self, article_id: ArticleId, user_id: UserId) -> Result<bool, ArticleError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND article_id = $2")
            .bind(user_id.0)
            .bind(article_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, article_id: ArticleId, user_id: UserId) -> Result<bool, ArticleError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM favorites WHERE user_id = $1 AND article_id = $2)",
        )
        .bind(user_id.0)
        .bind(article_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn count(&self, article_id: ArticleId) -> Result<u64, ArticleError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM favorites WHERE article_id = $1",
        )
        .bind(article_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
