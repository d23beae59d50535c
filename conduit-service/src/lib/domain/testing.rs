//! Shared mocks and fixtures for domain and inbound tests.

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use mockall::mock;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::Slug;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::NewComment;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::ports::TagRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::FollowRepository;
use crate::domain::user::ports::UserRepository;

pub const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes_long";

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn create(&self, user: NewUser) -> Result<User, UserError>;
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        async fn update(&self, user: User) -> Result<User, UserError>;
    }
}

mock! {
    pub FollowRepo {}

    #[async_trait]
    impl FollowRepository for FollowRepo {
        async fn follow(&self, follower: UserId, followee: UserId) -> Result<(), UserError>;
        async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<(), UserError>;
        async fn is_following(&self, follower: UserId, followee: UserId) -> Result<bool, UserError>;
    }
}

mock! {
    pub ArticleRepo {}

    #[async_trait]
    impl ArticleRepository for ArticleRepo {
        async fn insert(&self, article: NewArticle) -> Result<Article, ArticleError>;
        async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, ArticleError>;
        async fn update(&self, article: Article) -> Result<Article, ArticleError>;
        async fn delete_cascade(&self, id: ArticleId) -> Result<(), ArticleError>;
    }
}

mock! {
    pub TagRepo {}

    #[async_trait]
    impl TagRepository for TagRepo {
        async fn find_or_create(&self, name: &str) -> Result<Tag, ArticleError>;
        async fn replace_article_tags(&self, article_id: ArticleId, tag_ids: &[TagId]) -> Result<(), ArticleError>;
        async fn list_all(&self) -> Result<Vec<Tag>, ArticleError>;
    }
}

mock! {
    pub FavoriteRepo {}

    #[async_trait]
    impl FavoriteRepository for FavoriteRepo {
        async fn insert(&self, article_id: ArticleId, user_id: UserId) -> Result<(), ArticleError>;
        async fn delete(&self, article_id: ArticleId, user_id: UserId) -> Result<bool, ArticleError>;
        async fn exists(&self, article_id: ArticleId, user_id: UserId) -> Result<bool, ArticleError>;
        async fn count(&self, article_id: ArticleId) -> Result<u64, ArticleError>;
    }
}

mock! {
    pub CommentRepo {}

    #[async_trait]
    impl CommentRepository for CommentRepo {
        async fn insert(&self, comment: NewComment) -> Result<Comment, CommentError>;
        async fn list_for_article(&self, article_id: ArticleId) -> Result<Vec<Comment>, CommentError>;
        async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentError>;
        async fn delete(&self, id: CommentId) -> Result<(), CommentError>;
    }
}

/// Fixed instant so fixtures built twice compare equal.
pub fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn sample_user(id: i64, username: &str) -> User {
    User {
        id: UserId(id),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
        password_hash: "$argon2id$test_hash".to_string(),
        bio: None,
        image: None,
        created_at: fixed_time(),
    }
}

pub fn sample_article(id: i64, slug: &str, author_id: UserId) -> Article {
    let now = fixed_time();
    Article {
        id: ArticleId(id),
        slug: Slug::new(slug),
        title: "How to train your dragon".to_string(),
        description: "Ever wonder how?".to_string(),
        body: "It takes a Jacobian".to_string(),
        author_id,
        tag_list: vec![],
        created_at: now,
        updated_at: now,
    }
}
