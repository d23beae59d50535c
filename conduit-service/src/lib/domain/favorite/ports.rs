use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::user::models::UserId;

/// Persistence operations for the user/article favorite join.
#[async_trait]
pub trait FavoriteRepository: Send + Sync + 'static {
    /// Insert the pair.
    ///
    /// # Errors
    /// * `DuplicateFavorite` - The pair already exists
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, article_id: ArticleId, user_id: UserId) -> Result<(), ArticleError>;

    /// Delete the pair, returning whether a row was removed.
    async fn delete(&self, article_id: ArticleId, user_id: UserId) -> Result<bool, ArticleError>;

    async fn exists(&self, article_id: ArticleId, user_id: UserId) -> Result<bool, ArticleError>;

    /// Live number of users who favorited the article.
    async fn count(&self, article_id: ArticleId) -> Result<u64, ArticleError>;
}
