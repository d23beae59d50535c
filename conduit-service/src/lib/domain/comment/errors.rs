use thiserror::Error;

use crate::domain::article::errors::ArticleError;
use crate::domain::user::errors::UserError;

/// Error for CommentBody validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentBodyError {
    #[error("can't be blank")]
    Blank,
}

/// Top-level error for comment operations
#[derive(Debug, Clone, Error)]
pub enum CommentError {
    #[error("Invalid comment body: {0}")]
    InvalidBody(#[from] CommentBodyError),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Comment not found: {0}")]
    NotFound(String),

    #[error("Only the author may delete this comment")]
    Forbidden,

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error(transparent)]
    Article(ArticleError),
}

impl From<ArticleError> for CommentError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound(slug) => CommentError::ArticleNotFound(slug),
            ArticleError::User(e) => CommentError::User(e),
            ArticleError::DatabaseError(e) => CommentError::DatabaseError(e),
            other => CommentError::Article(other),
        }
    }
}
