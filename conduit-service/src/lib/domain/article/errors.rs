use thiserror::Error;

use crate::domain::errors::FieldErrors;
use crate::domain::user::errors::UserError;

/// Top-level error for article, tag and favorite operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Only the author may modify this article")]
    Forbidden,

    // Storage-reported uniqueness violations, handled inside the domain
    #[error("Slug already taken")]
    SlugTaken,

    #[error("Article already favorited")]
    DuplicateFavorite,

    #[error(transparent)]
    User(#[from] UserError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<FieldErrors> for ArticleError {
    fn from(errors: FieldErrors) -> Self {
        ArticleError::Validation(errors)
    }
}
