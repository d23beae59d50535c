use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::article::models::ArticleId;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::NewComment;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::user::models::UserId;

pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    article_id: i64,
    author_id: i64,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: CommentId(row.id),
            article_id: ArticleId(row.article_id),
            author_id: UserId(row.author_id),
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> CommentError {
    CommentError::DatabaseError(e.to_string())
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentError> {
        sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (article_id, author_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, article_id, author_id, body, created_at, updated_at
            "#,
        )
        .bind(comment.article_id.0)
        .bind(comment.author_id.0)
        .bind(comment.body.as_str())
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await
        .map(Comment::from)
        .map_err(database_error)
    }

    async fn list_for_article(&self, article_id: ArticleId) -> Result<Vec<Comment>, CommentError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, article_id, author_id, body, created_at, updated_at
            FROM comments
            WHERE article_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(article_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, article_id, author_id, body, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Comment::from))
    }

    async fn delete(&self, id: CommentId) -> Result<(), CommentError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(CommentError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
