use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::FieldErrors;
use crate::domain::user::models::Profile;
use crate::domain::user::models::UserId;

/// Article aggregate root.
///
/// `tag_list` is ordered by name and never contains duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: UserId,
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(pub i64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// URL-safe article identifier.
///
/// Derived from the title once at creation and never regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    const FALLBACK: &'static str = "article";
    const SUFFIX_LENGTH: usize = 8;
    /// Longest stored slug, matching `articles.slug`.
    pub const MAX_LENGTH: usize = 255;
    /// Longest base slug that still fits once a `-xxxxxxxx` suffix is added.
    const MAX_BASE_LENGTH: usize = Self::MAX_LENGTH - 1 - Self::SUFFIX_LENGTH;

    /// Wrap an existing slug, e.g. one taken from a request path.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Base slug for a title: lowercase words joined by hyphens.
    ///
    /// Titles with no sluggable characters fall back to `article`. Long
    /// titles are cut so a suffixed slug still fits in storage.
    pub fn from_title(title: &str) -> Self {
        let slug = slug::slugify(title);
        let base = truncate(&slug, Self::MAX_BASE_LENGTH).trim_end_matches('-');
        if base.is_empty() {
            Self(Self::FALLBACK.to_string())
        } else {
            Self(base.to_string())
        }
    }

    /// This slug with a random `-xxxxxxxx` hex suffix.
    pub fn with_random_suffix(&self) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", self.0, &random[..Self::SUFFIX_LENGTH]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Longest prefix of `value` of at most `max` bytes ending on a char boundary.
fn truncate(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Article row to be inserted; storage assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateArticleCommand {
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
}

impl CreateArticleCommand {
    /// # Errors
    /// Field errors for every blank text field
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("body", &self.body),
        ] {
            if value.trim().is_empty() {
                errors.add(field, "can't be blank");
            }
        }
        errors.into_result()
    }
}

/// Partial article update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tag_list: Option<Vec<String>>,
}

impl UpdateArticleCommand {
    /// # Errors
    /// Field errors for every provided but blank text field
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("body", &self.body),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                errors.add(field, "can't be blank");
            }
        }
        errors.into_result()
    }
}

/// An article as presented to a particular viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub article: Article,
    pub author: Profile,
    pub favorited: bool,
    pub favorites_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_title() {
        assert_eq!(Slug::from_title("How to train your dragon").as_str(), "how-to-train-your-dragon");
        assert_eq!(Slug::from_title("  Hello,   World!  ").as_str(), "hello-world");
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(Slug::from_title("!!!").as_str(), "article");
        assert_eq!(Slug::from_title("").as_str(), "article");
    }

    #[test]
    fn test_long_titles_fit_slug_column() {
        let cjk = Slug::from_title(&"中文标题".repeat(15));
        assert!(cjk.as_str().len() <= 246);
        assert!(!cjk.as_str().ends_with('-'));
        assert!(cjk.with_random_suffix().as_str().len() <= Slug::MAX_LENGTH);

        let ascii = Slug::from_title(&"a".repeat(400));
        assert_eq!(ascii.as_str(), "a".repeat(246));
        assert_eq!(ascii.with_random_suffix().as_str().len(), Slug::MAX_LENGTH);
    }

    #[test]
    fn test_slug_cut_drops_trailing_hyphen() {
        // "ab-" repeated puts a hyphen right at the cut.
        let slug = Slug::from_title(&"ab ".repeat(100));
        assert!(!slug.as_str().ends_with('-'));
        assert!(slug.as_str().len() <= 246);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("héllo", 3), "hé");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_slug_random_suffix() {
        let base = Slug::from_title("Favorite Test");
        let suffixed = base.with_random_suffix();
        let suffix = suffixed
            .as_str()
            .strip_prefix("favorite-test-")
            .unwrap();

        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(suffixed, base.with_random_suffix());
    }

    #[test]
    fn test_create_command_validation() {
        let command = CreateArticleCommand {
            title: "Title".to_string(),
            description: " ".to_string(),
            body: String::new(),
            tag_list: vec![],
        };

        let errors = command.validate().unwrap_err();
        assert!(errors.get("title").is_none());
        assert_eq!(errors.get("description"), Some(&["can't be blank".to_string()][..]));
        assert!(errors.get("body").is_some());
    }

    #[test]
    fn test_update_command_validation() {
        assert!(UpdateArticleCommand::default().validate().is_ok());

        let command = UpdateArticleCommand {
            body: Some(String::new()),
            ..Default::default()
        };
        assert!(command.validate().unwrap_err().get("body").is_some());
    }
}
