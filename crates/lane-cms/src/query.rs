//! Query builder for the CMS request syntax.
//!
//! The CMS selects which relations come back through a bracketed query
//! syntax (`populate[seo][populate]=*`), with a per-component form for
//! dynamic zones (`populate[page_content][on][shared.hero-section]...`).
//! Building these strings by hand at every call site is error prone, so
//! this module provides a small builder that produces the pairs in call
//! order and percent-encodes them once at the end.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one query component per RFC 3986.
fn encode_component(input: &str) -> String {
    percent_encode(input.as_bytes(), QUERY_ENCODE_SET).to_string()
}

/// Builder for a CMS request query string.
///
/// # Example
///
/// ```
/// use lane_cms::Query;
///
/// let query = Query::new()
///     .populate("seo")
///     .populate_component("page_content", "shared.hero-section");
/// assert!(query.encode().starts_with("populate%5Bseo%5D"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate every first-level relation (`populate=*`).
    #[must_use]
    pub fn populate_all(self) -> Self {
        self.push("populate".to_owned(), "*".to_owned())
    }

    /// Populate one relation and everything beneath it.
    #[must_use]
    pub fn populate(self, relation: &str) -> Self {
        self.push(format!("populate[{relation}][populate]"), "*".to_owned())
    }

    /// Populate one dynamic-zone component and everything beneath it.
    ///
    /// Dynamic zones carry mixed component types; the CMS requires the
    /// population rules to name each component individually.
    #[must_use]
    pub fn populate_component(self, zone: &str, component: &str) -> Self {
        self.push(
            format!("populate[{zone}][on][{component}][populate]"),
            "*".to_owned(),
        )
    }

    /// Add an exact-match filter on a field.
    #[must_use]
    pub fn filter_eq(self, field: &str, value: &str) -> Self {
        self.push(format!("filters[{field}][$eq]"), value.to_owned())
    }

    /// Add a sort expression, e.g. `"publishedAt:desc"`.
    #[must_use]
    pub fn sort(self, expr: &str) -> Self {
        self.push("sort".to_owned(), expr.to_owned())
    }

    /// Set the page size for collection requests.
    #[must_use]
    pub fn page_size(self, size: u32) -> Self {
        self.push("pagination[pageSize]".to_owned(), size.to_string())
    }

    fn push(mut self, key: String, value: String) -> Self {
        self.params.push((key, value));
        self
    }

    /// Encode the parameters as a query string, in insertion order.
    ///
    /// Returns an empty string when no parameters were added.
    #[must_use]
    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
