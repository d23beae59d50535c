use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::ports::TagRepository;

pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TagRow {
    id: i64,
    name: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: TagId(row.id),
            name: row.name,
        }
    }
}

fn database_error(e: sqlx::Error) -> ArticleError {
    ArticleError::DatabaseError(e.to_string())
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_or_create(&self, name: &str) -> Result<Tag, ArticleError> {
        // A concurrent insert of the same name makes ours a no-op; the
        // SELECT then sees the committed row.
        sqlx::query("INSERT INTO tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map(Tag::from)
            .map_err(database_error)
    }

    async fn replace_article_tags(
        &self,
        article_id: ArticleId,
        tag_ids: &[TagId],
    ) -> Result<(), ArticleError> {
        let ids: Vec<i64> = tag_ids.iter().map(|id| id.0).collect();
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query("DELETE FROM article_tags WHERE article_id = $1 AND NOT (tag_id = ANY($2))")
            .bind(article_id.0)
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO article_tags (article_id, tag_id)
            SELECT $1, UNNEST($2::bigint[])
            ON CONFLICT (article_id, tag_id) DO NOTHING
            "#,
        )
        .bind(article_id.0)
        .bind(&ids)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)
    }

    async fn list_all(&self) -> Result<Vec<Tag>, ArticleError> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }
}
