//! Postgres implementations of the domain repository ports.

pub mod article;
pub mod comment;
pub mod favorite;
pub mod follow;
pub mod tag;
pub mod user;

pub use article::PostgresArticleRepository;
pub use comment::PostgresCommentRepository;
pub use favorite::PostgresFavoriteRepository;
pub use follow::PostgresFollowRepository;
pub use tag::PostgresTagRepository;
pub use user::PostgresUserRepository;

/// Name of the violated unique constraint, if `err` is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    err.as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint())
}
