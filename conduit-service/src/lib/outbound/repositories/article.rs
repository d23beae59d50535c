use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use super::unique_violation;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::Slug;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;

const SLUG_CONSTRAINT: &str = "articles_slug_key";

pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ArticleRow {
    id: i64,
    slug: String,
    title: String,
    description: String,
    body: String,
    author_id: i64,
    tag_list: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: ArticleId(row.id),
            slug: Slug::new(row.slug),
            title: row.title,
            description: row.description,
            body: row.body,
            author_id: UserId(row.author_id),
            tag_list: row.tag_list,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> ArticleError {
    ArticleError::DatabaseError(e.to_string())
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn insert(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            INSERT INTO articles (slug, title, description, body, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, slug, title, description, body, author_id,
                      '{}'::text[] AS tag_list, created_at, updated_at
            "#,
        )
        .bind(article.slug.as_str())
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.body)
        .bind(article.author_id.0)
        .bind(article.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(SLUG_CONSTRAINT) => ArticleError::SlugTaken,
            _ => database_error(e),
        })?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT a.id, a.slug, a.title, a.description, a.body, a.author_id,
                   COALESCE(
                       ARRAY_AGG(t.name::text ORDER BY t.name) FILTER (WHERE t.name IS NOT NULL),
                       '{}'::text[]
                   ) AS tag_list,
                   a.created_at, a.updated_at
            FROM articles a
            LEFT JOIN article_tags link ON link.article_id = a.id
            LEFT JOIN tags t ON t.id = link.tag_id
            WHERE a.slug = $1
            GROUP BY a.id
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Article::from))
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            UPDATE articles
            SET title = $2, description = $3, body = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, slug, title, description, body, author_id,
                      '{}'::text[] AS tag_list, created_at, updated_at
            "#,
        )
        .bind(article.id.0)
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.body)
        .bind(article.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or_else(|| ArticleError::NotFound(article.slug.to_string()))?;

        Ok(Article {
            tag_list: article.tag_list,
            ..row.into()
        })
    }

    async fn delete_cascade(&self, id: ArticleId) -> Result<(), ArticleError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        for statement in [
            "DELETE FROM article_tags WHERE article_id = $1",
            "DELETE FROM favorites WHERE article_id = $1",
            "DELETE FROM comments WHERE article_id = $1",
        ] {
            sqlx::query(statement)
                .bind(id.0)
                .execute(&mut *tx)
                .await
                .map_err(database_error)?;
        }

        let deleted = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        if deleted.rows_affected() == 0 {
            return Err(ArticleError::NotFound(id.to_string()));
        }

        tx.commit().await.map_err(database_error)
    }
}
