use std::sync::Arc;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::user::models::UserId;

/// Idempotent favorite membership on top of a unique join table.
pub struct FavoriteManager<FR>
where
    FR: FavoriteRepository,
{
    favorites: Arc<FR>,
}

impl<FR> FavoriteManager<FR>
where
    FR: FavoriteRepository,
{
    pub fn new(favorites: Arc<FR>) -> Self {
        Self { favorites }
    }

    /// Record that `user_id` favorites the article.
    ///
    /// Favoriting twice leaves a single membership.
    pub async fn favorite(&self, article_id: ArticleId, user_id: UserId) -> Result<(), ArticleError> {
        match self.favorites.insert(article_id, user_id).await {
            Ok(()) => Ok(()),
            Err(ArticleError::DuplicateFavorite) => {
                tracing::debug!(%article_id, %user_id, "article already favorited");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the membership if present.
    pub async fn unfavorite(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> Result<(), ArticleError> {
        if !self.favorites.delete(article_id, user_id).await? {
            tracing::debug!(%article_id, %user_id, "article was not favorited");
        }
        Ok(())
    }

    pub async fn count(&self, article_id: ArticleId) -> Result<u64, ArticleError> {
        self.favorites.count(article_id).await
    }

    pub async fn is_favorited(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> Result<bool, ArticleError> {
        self.favorites.exists(article_id, user_id).await
    }
}
