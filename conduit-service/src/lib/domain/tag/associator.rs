use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::ports::TagRepository;

/// Keeps an article's tag links in step with a requested list of names.
pub struct TagAssociator<TR>
where
    TR: TagRepository,
{
    tags: Arc<TR>,
}

impl<TR> TagAssociator<TR>
where
    TR: TagRepository,
{
    pub fn new(tags: Arc<TR>) -> Self {
        Self { tags }
    }

    /// Trimmed, non-empty, de-duplicated names in sorted order.
    pub fn normalize<S: AsRef<str>>(names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Replace the article's tags with exactly `names`.
    ///
    /// Missing tags are created. An empty list removes every link.
    ///
    /// # Returns
    /// The linked tags, ordered by name
    ///
    /// # Errors
    /// * `DatabaseError` - Tag creation or link replacement failed
    pub async fn set_tags<S: AsRef<str> + Sync>(
        &self,
        article_id: ArticleId,
        names: &[S],
    ) -> Result<Vec<Tag>, ArticleError> {
        let names = Self::normalize(names);

        let mut linked = Vec::with_capacity(names.len());
        for name in &names {
            linked.push(self.tags.find_or_create(name).await?);
        }

        let tag_ids: Vec<TagId> = linked.iter().map(|tag| tag.id).collect();
        self.tags.replace_article_tags(article_id, &tag_ids).await?;

        tracing::debug!(%article_id, tags = linked.len(), "article tags replaced");

        Ok(linked)
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, ArticleError> {
        self.tags.list_all().await
    }
}
