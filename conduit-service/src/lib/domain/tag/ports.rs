use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;

/// Persistence operations for tags and article/tag links.
#[async_trait]
pub trait TagRepository: Send + Sync + 'static {
    /// Return the tag named `name`, inserting it first if needed.
    ///
    /// Concurrent callers with the same name observe the same tag.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_or_create(&self, name: &str) -> Result<Tag, ArticleError>;

    /// Make `tag_ids` the exact link set of the article, atomically.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed; no links changed
    async fn replace_article_tags(
        &self,
        article_id: ArticleId,
        tag_ids: &[TagId],
    ) -> Result<(), ArticleError>;

    /// Every known tag, ordered by name.
    async fn list_all(&self) -> Result<Vec<Tag>, ArticleError>;
}
