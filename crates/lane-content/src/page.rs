//! Page documents and their SEO metadata.

use serde::Deserialize;
use serde_json::Value;

use crate::blocks::{ContentBlock, null_or_default, parse_blocks};

/// A CMS page: a title, an ordered list of content blocks, and SEO fields.
///
/// `page_content` stays as raw JSON here; block decoding is a separate,
/// lossy step (see [`PageDocument::blocks`]) so one bad block cannot poison
/// the whole document decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub page_content: Vec<Value>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl PageDocument {
    /// Decode the page's block list, skipping anything unrecognized.
    #[must_use]
    pub fn blocks(&self) -> Vec<ContentBlock> {
        parse_blocks(&self.page_content)
    }
}

/// SEO fields attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Seo {
    #[serde(default, rename = "metaTitle")]
    pub meta_title: Option<String>,
    #[serde(default, rename = "metaDescription")]
    pub meta_description: Option<String>,
    #[serde(default, rename = "shareImage")]
    pub share_image: Option<Media>,
}

/// An uploaded media file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Media {
    #[serde(default, deserialize_with = "null_or_default")]
    pub url: String,
    #[serde(default, rename = "alternativeText")]
    pub alternative_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_full_page() {
        let page: PageDocument = serde_json::from_value(json!({
            "title": "Pricing",
            "page_content": [
                { "__component": "shared.hero-section", "heading": "Plans" },
                { "__component": "shared.pricing-table" }
            ],
            "seo": {
                "metaTitle": "Pricing | Lane Auto Transport",
                "metaDescription": "Open and enclosed transport rates.",
                "shareImage": { "url": "/uploads/pricing.png", "alternativeText": "A carrier" }
            },
            "updatedAt": "2025-10-12T08:30:00.000Z"
        }))
        .unwrap();

        assert_eq!(page.title.as_deref(), Some("Pricing"));
        assert_eq!(page.page_content.len(), 2);
        assert_eq!(page.blocks().len(), 2);

        let seo = page.seo.unwrap();
        assert_eq!(seo.meta_title.as_deref(), Some("Pricing | Lane Auto Transport"));
        assert_eq!(seo.share_image.unwrap().url, "/uploads/pricing.png");
        assert_eq!(page.updated_at.as_deref(), Some("2025-10-12T08:30:00.000Z"));
    }

    #[test]
    fn test_null_page_content_is_empty() {
        let page: PageDocument = serde_json::from_value(json!({
            "title": "Sparse",
            "page_content": null
        }))
        .unwrap();

        assert!(page.page_content.is_empty());
        assert!(page.blocks().is_empty());
    }

    #[test]
    fn test_bare_object_decodes_to_defaults() {
        let page: PageDocument = serde_json::from_value(json!({})).unwrap();

        assert_eq!(page, PageDocument::default());
    }

    #[test]
    fn test_blocks_skip_unknown_components() {
        let page: PageDocument = serde_json::from_value(json!({
            "page_content": [
                { "__component": "shared.carousel" },
                { "__component": "shared.rich-text", "body": "kept" }
            ]
        }))
        .unwrap();

        assert_eq!(page.blocks().len(), 1);
    }
}
