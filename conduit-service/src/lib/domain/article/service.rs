use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleView;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::Slug;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::favorite::manager::FavoriteManager;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::tag::associator::TagAssociator;
use crate::domain::tag::models::Tag;
use crate::domain::tag::ports::TagRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::FollowRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::profiles::ProfileLookup;

/// Upper bound on inserts tried for one new article.
const MAX_SLUG_ATTEMPTS: usize = 5;

/// Domain service for the article aggregate.
///
/// Owns slug assignment and author checks, and delegates tag links to
/// [`TagAssociator`] and favorite membership to [`FavoriteManager`].
pub struct ArticleService<AR, TR, FR, UR, FL>
where
    AR: ArticleRepository,
    TR: TagRepository,
    FR: FavoriteRepository,
    UR: UserRepository,
    FL: FollowRepository,
{
    articles: Arc<AR>,
    tags: TagAssociator<TR>,
    favorites: FavoriteManager<FR>,
    profiles: ProfileLookup<UR, FL>,
}

impl<AR, TR, FR, UR, FL> ArticleService<AR, TR, FR, UR, FL>
where
    AR: ArticleRepository,
    TR: TagRepository,
    FR: FavoriteRepository,
    UR: UserRepository,
    FL: FollowRepository,
{
    pub fn new(
        articles: Arc<AR>,
        tags: Arc<TR>,
        favorites: Arc<FR>,
        profiles: ProfileLookup<UR, FL>,
    ) -> Self {
        Self {
            articles,
            tags: TagAssociator::new(tags),
            favorites: FavoriteManager::new(favorites),
            profiles,
        }
    }

    /// Insert under the base slug, retrying with a random suffix each time
    /// storage reports the slug as taken.
    async fn insert_with_unique_slug(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let base = article.slug.clone();
        let mut candidate = article;

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            match self.articles.insert(candidate.clone()).await {
                Err(ArticleError::SlugTaken) => {
                    tracing::debug!(slug = %candidate.slug, attempt, "slug taken, retrying");
                    candidate.slug = base.with_random_suffix();
                }
                result => return result,
            }
        }

        tracing::warn!(slug = %base, "no free slug after {} attempts", MAX_SLUG_ATTEMPTS);
        Err(ArticleError::SlugTaken)
    }

    /// Remove an article whose creation could not be completed.
    async fn discard(&self, article: &Article) {
        if let Err(err) = self.articles.delete_cascade(article.id).await {
            tracing::error!(
                article_id = %article.id,
                slug = %article.slug,
                error = %err,
                "failed to remove partially created article"
            );
        }
    }

    async fn authored_by(&self, slug: &str, requester: UserId) -> Result<Article, ArticleError> {
        let article = self.find_by_slug(slug).await?;
        if article.author_id != requester {
            return Err(ArticleError::Forbidden);
        }
        Ok(article)
    }
}

#[async_trait]
impl<AR, TR, FR, UR, FL> ArticleServicePort for ArticleService<AR, TR, FR, UR, FL>
where
    AR: ArticleRepository,
    TR: TagRepository,
    FR: FavoriteRepository,
    UR: UserRepository,
    FL: FollowRepository,
{
    async fn create_article(
        &self,
        author: UserId,
        command: CreateArticleCommand,
    ) -> Result<ArticleView, ArticleError> {
        command.validate()?;

        let now = Utc::now();
        let mut article = self
            .insert_with_unique_slug(NewArticle {
                slug: Slug::from_title(&command.title),
                title: command.title,
                description: command.description,
                body: command.body,
                author_id: author,
                created_at: now,
            })
            .await?;

        let tags = match self.tags.set_tags(article.id, command.tag_list.as_slice()).await {
            Ok(tags) => tags,
            Err(err) => {
                self.discard(&article).await;
                return Err(err);
            }
        };
        article.tag_list = tags.into_iter().map(|tag| tag.name).collect();

        tracing::info!(article_id = %article.id, slug = %article.slug, "article created");

        self.view(article, Some(author)).await
    }

    async fn get_article(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<ArticleView, ArticleError> {
        let article = self.find_by_slug(slug).await?;
        self.view(article, viewer).await
    }

    async fn update_article(
        &self,
        slug: &str,
        requester: UserId,
        command: UpdateArticleCommand,
    ) -> Result<ArticleView, ArticleError> {
        let mut article = self.authored_by(slug, requester).await?;
        command.validate()?;

        if let Some(title) = command.title {
            article.title = title;
        }
        if let Some(description) = command.description {
            article.description = description;
        }
        if let Some(body) = command.body {
            article.body = body;
        }
        article.updated_at = Utc::now();

        // Links are swapped first so a failed row update can put them back.
        let id = article.id;
        let previous_tags = article.tag_list.clone();
        let new_tags = match command.tag_list {
            Some(names) => Some(self.tags.set_tags(id, names.as_slice()).await?),
            None => None,
        };

        let mut article = match self.articles.update(article).await {
            Ok(article) => article,
            Err(err) => {
                if new_tags.is_some() {
                    if let Err(restore) = self.tags.set_tags(id, previous_tags.as_slice()).await {
                        tracing::error!(article_id = %id, error = %restore, "failed to restore tags");
                    }
                }
                return Err(err);
            }
        };
        article.tag_list = match new_tags {
            Some(tags) => tags.into_iter().map(|tag| tag.name).collect(),
            None => previous_tags,
        };

        self.view(article, Some(requester)).await
    }

    async fn delete_article(&self, slug: &str, requester: UserId) -> Result<(), ArticleError> {
        let article = self.authored_by(slug, requester).await?;
        self.articles.delete_cascade(article.id).await?;

        tracing::info!(article_id = %article.id, slug = %article.slug, "article deleted");
        Ok(())
    }

    async fn favorite_article(
        &self,
        slug: &str,
        user: UserId,
    ) -> Result<ArticleView, ArticleError> {
        let article = self.find_by_slug(slug).await?;
        self.favorites.favorite(article.id, user).await?;
        self.view(article, Some(user)).await
    }

    async fn unfavorite_article(
        &self,
        slug: &str,
        user: UserId,
    ) -> Result<ArticleView, ArticleError> {
        let article = self.find_by_slug(slug).await?;
        self.favorites.unfavorite(article.id, user).await?;
        self.view(article, Some(user)).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Article, ArticleError> {
        self.articles
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ArticleError::NotFound(slug.to_string()))
    }

    async fn is_favorited_by(&self, article: &Article, user: UserId) -> Result<bool, ArticleError> {
        self.favorites.is_favorited(article.id, user).await
    }

    async fn favorites_count(&self, article: &Article) -> Result<u64, ArticleError> {
        self.favorites.count(article.id).await
    }

    async fn view(
        &self,
        article: Article,
        viewer: Option<UserId>,
    ) -> Result<ArticleView, ArticleError> {
        let author = self.profiles.profile_of(article.author_id, viewer).await?;
        let favorited = match viewer {
            Some(user) if user.is_assigned() => self.is_favorited_by(&article, user).await?,
            _ => false,
        };
        let favorites_count = self.favorites_count(&article).await?;

        Ok(ArticleView {
            article,
            author,
            favorited,
            favorites_count,
        })
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ArticleError> {
        self.tags.list_tags().await
    }
}
