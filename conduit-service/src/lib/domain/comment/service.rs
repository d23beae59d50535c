use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::article::models::Article;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentBody;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentView;
use crate::domain::comment::models::NewComment;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::FollowRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::profiles::ProfileLookup;

pub struct CommentService<CR, AR, UR, FL>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
    FL: FollowRepository,
{
    comments: Arc<CR>,
    articles: Arc<AR>,
    profiles: ProfileLookup<UR, FL>,
}

impl<CR, AR, UR, FL> CommentService<CR, AR, UR, FL>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
    FL: FollowRepository,
{
    pub fn new(comments: Arc<CR>, articles: Arc<AR>, profiles: ProfileLookup<UR, FL>) -> Self {
        Self {
            comments,
            articles,
            profiles,
        }
    }

    async fn article(&self, slug: &str) -> Result<Article, CommentError> {
        self.articles
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| CommentError::ArticleNotFound(slug.to_string()))
    }
}

#[async_trait]
impl<CR, AR, UR, FL> CommentServicePort for CommentService<CR, AR, UR, FL>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
    FL: FollowRepository,
{
    async fn add_comment(
        &self,
        slug: &str,
        author: UserId,
        body: CommentBody,
    ) -> Result<CommentView, CommentError> {
        let article = self.article(slug).await?;

        let comment = self
            .comments
            .insert(NewComment {
                article_id: article.id,
                author_id: author,
                body,
                created_at: Utc::now(),
            })
            .await?;

        let author = self.profiles.profile_of(author, Some(author)).await?;
        Ok(CommentView { comment, author })
    }

    async fn list_comments(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<Vec<CommentView>, CommentError> {
        let article = self.article(slug).await?;
        let comments = self.comments.list_for_article(article.id).await?;

        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            let author = self.profiles.profile_of(comment.author_id, viewer).await?;
            views.push(CommentView { comment, author });
        }
        Ok(views)
    }

    async fn delete_comment(
        &self,
        slug: &str,
        id: CommentId,
        requester: UserId,
    ) -> Result<(), CommentError> {
        let article = self.article(slug).await?;

        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .filter(|comment| comment.article_id == article.id)
            .ok_or_else(|| CommentError::NotFound(id.to_string()))?;

        if comment.author_id != requester {
            return Err(CommentError::Forbidden);
        }

        self.comments.delete(comment.id).await?;
        tracing::debug!(comment_id = %comment.id, article_id = %article.id, "comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::article::models::ArticleId;
    use crate::domain::comment::models::Comment;
    use crate::domain::testing::sample_article;
    use crate::domain::testing::sample_user;
    use crate::domain::testing::MockArticleRepo;
    use crate::domain::testing::MockCommentRepo;
    use crate::domain::testing::MockFollowRepo;
    use crate::domain::testing::MockUserRepo;

    const AUTHOR: UserId = UserId(1);
    const COMMENTER: UserId = UserId(2);

    fn comment(id: i64, article_id: i64, author_id: UserId) -> Comment {
        let created_at = Utc::now() - Duration::minutes(10 - id);
        Comment {
            id: CommentId(id),
            article_id: ArticleId(article_id),
            author_id,
            body: format!("comment {}", id),
            created_at,
            updated_at: created_at,
        }
    }

    fn articles() -> MockArticleRepo {
        let mut articles = MockArticleRepo::new();
        articles
            .expect_find_by_slug()
            .returning(|slug| Ok(Some(sample_article(7, slug, AUTHOR))));
        articles
    }

    fn profiles() -> ProfileLookup<MockUserRepo, MockFollowRepo> {
        let mut users = MockUserRepo::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_user(id.0, &format!("user{}", id.0)))));
        let mut follows = MockFollowRepo::new();
        follows.expect_is_following().returning(|_, _| Ok(false));
        ProfileLookup::new(Arc::new(users), Arc::new(follows))
    }

    #[tokio::test]
    async fn test_add_comment() {
        let mut comments = MockCommentRepo::new();
        comments
            .expect_insert()
            .withf(|c| c.article_id == ArticleId(7) && c.body.as_str() == "Nice post")
            .times(1)
            .returning(|c| {
                Ok(Comment {
                    id: CommentId(1),
                    article_id: c.article_id,
                    author_id: c.author_id,
                    body: c.body.into_inner(),
                    created_at: c.created_at,
                    updated_at: c.created_at,
                })
            });

        let service = CommentService::new(Arc::new(comments), Arc::new(articles()), profiles());
        let body = CommentBody::new("Nice post".to_string()).unwrap();
        let view = service.add_comment("dragons", COMMENTER, body).await.unwrap();

        assert_eq!(view.comment.id, CommentId(1));
        assert_eq!(view.author.username.as_str(), "user2");
    }

    #[tokio::test]
    async fn test_add_comment_to_missing_article() {
        let mut articles = MockArticleRepo::new();
        articles.expect_find_by_slug().returning(|_| Ok(None));
        let mut comments = MockCommentRepo::new();
        comments.expect_insert().times(0);

        let service = CommentService::new(Arc::new(comments), Arc::new(articles), profiles());
        let body = CommentBody::new("Hello".to_string()).unwrap();
        let result = service.add_comment("missing", COMMENTER, body).await;

        assert!(matches!(result, Err(CommentError::ArticleNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_comments_keeps_storage_order() {
        let mut comments = MockCommentRepo::new();
        comments
            .expect_list_for_article()
            .with(eq(ArticleId(7)))
            .returning(|_| Ok(vec![comment(1, 7, AUTHOR), comment(2, 7, COMMENTER)]));

        let service = CommentService::new(Arc::new(comments), Arc::new(articles()), profiles());
        let views = service.list_comments("dragons", None).await.unwrap();

        let ids: Vec<CommentId> = views.iter().map(|v| v.comment.id).collect();
        assert_eq!(ids, vec![CommentId(1), CommentId(2)]);
        assert_eq!(views[1].author.username.as_str(), "user2");
    }

    #[tokio::test]
    async fn test_delete_own_comment() {
        let mut comments = MockCommentRepo::new();
        comments
            .expect_find_by_id()
            .returning(|id| Ok(Some(comment(id.0, 7, COMMENTER))));
        comments
            .expect_delete()
            .with(eq(CommentId(3)))
            .times(1)
            .returning(|_| Ok(()));

        let service = CommentService::new(Arc::new(comments), Arc::new(articles()), profiles());

        assert!(service
            .delete_comment("dragons", CommentId(3), COMMENTER)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_someone_elses_comment() {
        let mut comments = MockCommentRepo::new();
        comments
            .expect_find_by_id()
            .returning(|id| Ok(Some(comment(id.0, 7, COMMENTER))));
        comments.expect_delete().times(0);

        let service = CommentService::new(Arc::new(comments), Arc::new(articles()), profiles());
        let result = service.delete_comment("dragons", CommentId(3), AUTHOR).await;

        assert!(matches!(result, Err(CommentError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_comment_from_other_article() {
        let mut comments = MockCommentRepo::new();
        comments
            .expect_find_by_id()
            .returning(|id| Ok(Some(comment(id.0, 99, COMMENTER))));
        comments.expect_delete().times(0);

        let service = CommentService::new(Arc::new(comments), Arc::new(articles()), profiles());
        let result = service.delete_comment("dragons", CommentId(3), COMMENTER).await;

        assert!(matches!(result, Err(CommentError::NotFound(_))));
    }
}
