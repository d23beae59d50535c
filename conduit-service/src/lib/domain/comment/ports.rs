use async_trait::async_trait;

use crate::domain::article::models::ArticleId;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentBody;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentView;
use crate::domain::comment::models::NewComment;
use crate::domain::user::models::UserId;

/// Port for comment operations.
#[async_trait]
pub trait CommentServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `ArticleNotFound` - No article with this slug
    async fn add_comment(
        &self,
        slug: &str,
        author: UserId,
        body: CommentBody,
    ) -> Result<CommentView, CommentError>;

    /// Comments on the article, oldest first.
    ///
    /// # Errors
    /// * `ArticleNotFound` - No article with this slug
    async fn list_comments(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<Vec<CommentView>, CommentError>;

    /// # Errors
    /// * `ArticleNotFound` - No article with this slug
    /// * `NotFound` - No such comment on this article
    /// * `Forbidden` - Requester did not write the comment
    async fn delete_comment(
        &self,
        slug: &str,
        id: CommentId,
        requester: UserId,
    ) -> Result<(), CommentError>;
}

/// Persistence operations for comments.
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentError>;

    /// Comments on the article ordered by creation time.
    async fn list_for_article(&self, article_id: ArticleId) -> Result<Vec<Comment>, CommentError>;

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentError>;

    /// # Errors
    /// * `NotFound` - Comment does not exist
    async fn delete(&self, id: CommentId) -> Result<(), CommentError>;
}
