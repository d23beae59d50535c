use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticleView;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::tag::models::Tag;
use crate::domain::user::models::UserId;

/// Port for article aggregate operations.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// Create an article authored by `author`.
    ///
    /// # Errors
    /// * `Validation` - Title, description or body is blank
    /// * `SlugTaken` - No free slug was found
    /// * `DatabaseError` - Database operation failed
    async fn create_article(
        &self,
        author: UserId,
        command: CreateArticleCommand,
    ) -> Result<ArticleView, ArticleError>;

    /// # Errors
    /// * `NotFound` - No article with this slug
    async fn get_article(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<ArticleView, ArticleError>;

    /// Apply a partial update. The slug is kept.
    ///
    /// # Errors
    /// * `NotFound` - No article with this slug
    /// * `Forbidden` - Requester is not the author
    /// * `Validation` - A provided field is blank
    async fn update_article(
        &self,
        slug: &str,
        requester: UserId,
        command: UpdateArticleCommand,
    ) -> Result<ArticleView, ArticleError>;

    /// Delete the article with its tag links, favorites and comments.
    ///
    /// # Errors
    /// * `NotFound` - No article with this slug
    /// * `Forbidden` - Requester is not the author
    async fn delete_article(&self, slug: &str, requester: UserId) -> Result<(), ArticleError>;

    async fn favorite_article(&self, slug: &str, user: UserId)
        -> Result<ArticleView, ArticleError>;

    async fn unfavorite_article(
        &self,
        slug: &str,
        user: UserId,
    ) -> Result<ArticleView, ArticleError>;

    /// # Errors
    /// * `NotFound` - No article with this slug
    async fn find_by_slug(&self, slug: &str) -> Result<Article, ArticleError>;

    async fn is_favorited_by(&self, article: &Article, user: UserId) -> Result<bool, ArticleError>;

    async fn favorites_count(&self, article: &Article) -> Result<u64, ArticleError>;

    /// Presentation of `article` for `viewer`, with author profile and
    /// favorite state.
    async fn view(
        &self,
        article: Article,
        viewer: Option<UserId>,
    ) -> Result<ArticleView, ArticleError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, ArticleError>;
}

/// Persistence operations for the article aggregate.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// Insert a new article without tags.
    ///
    /// # Errors
    /// * `SlugTaken` - Another article already owns the slug
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, article: NewArticle) -> Result<Article, ArticleError>;

    /// Article with its tag list, if the slug exists.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, ArticleError>;

    /// Persist title, description, body and `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn update(&self, article: Article) -> Result<Article, ArticleError>;

    /// Delete tag links, favorites, comments and the article in one
    /// transaction.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn delete_cascade(&self, id: ArticleId) -> Result<(), ArticleError>;
}
