//! Blog articles, categories, and listing filters.

use serde::Deserialize;

use crate::blocks::null_or_default;

/// Sentinel category label that disables category filtering.
pub const ALL_POSTS: &str = "All Posts";

/// A blog category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_or_default")]
    pub name: String,
    /// Marks the category the listing should open on.
    #[serde(default)]
    pub is_default: bool,
}

/// A blog article as the CMS returns it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub slug: String,
    /// Markdown body, present only on detail fetches.
    #[serde(default, deserialize_with = "null_or_default")]
    pub body: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
}

impl Article {
    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
    }

    fn matches_category(&self, active: &str) -> bool {
        active == ALL_POSTS || self.category.as_ref().is_some_and(|c| c.name == active)
    }
}

/// Filter a listing by free-text search and active category.
///
/// The search term is trimmed and matched case-insensitively as a substring
/// of the title or the excerpt. The category match is exact, except for the
/// [`ALL_POSTS`] sentinel which admits everything. An article without a
/// category only appears under the sentinel.
#[must_use]
pub fn filter_articles<'a>(
    articles: &'a [Article],
    search: &str,
    active_category: &str,
) -> Vec<&'a Article> {
    let needle = search.trim().to_lowercase();
    articles
        .iter()
        .filter(|article| article.matches_search(&needle) && article.matches_category(active_category))
        .collect()
}

/// The category a fresh listing starts on.
///
/// The one flagged as default wins, then the first category, then the
/// [`ALL_POSTS`] sentinel.
#[must_use]
pub fn default_category(categories: &[Category]) -> String {
    categories
        .iter()
        .find(|c| c.is_default)
        .or_else(|| categories.first())
        .map_or_else(|| ALL_POSTS.to_owned(), |c| c.name.clone())
}
