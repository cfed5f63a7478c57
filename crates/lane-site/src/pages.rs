//! Static page registry.
//!
//! Every marketing page maps a URL path to its CMS resource plus the
//! population rules naming exactly the relations that page uses. The CMS
//! will not expand dynamic-zone components it is not asked for, so each
//! page lists its own block types.

use lane_cms::Query;
use lane_content::blocks::{
    CtaBanner, Faq, Hero, LeadForm, PricingTable, RichText, Steps, Testimonials,
};

/// One registered page.
#[derive(Debug)]
pub struct PageDefinition {
    /// Logical page name, also the cache key.
    pub name: &'static str,
    /// URL path the page is served under.
    pub path: &'static str,
    /// CMS resource (single type) holding the page document.
    pub resource: &'static str,
    /// Title used when the CMS document carries none.
    pub title: &'static str,
    /// Block components this page's dynamic zone can contain.
    components: &'static [&'static str],
}

impl PageDefinition {
    /// The hand-built population rules for this page.
    #[must_use]
    pub fn query(&self) -> Query {
        let mut query = Query::new().populate("seo");
        for component in self.components {
            query = query.populate_component("page_content", component);
        }
        query
    }
}

/// Every page the site serves, in nav order.
pub const PAGES: &[PageDefinition] = &[
    PageDefinition {
        name: "home",
        path: "/",
        resource: "home-page",
        title: "Home",
        components: &[
            Hero::COMPONENT,
            Steps::COMPONENT,
            Testimonials::COMPONENT,
            CtaBanner::COMPONENT,
        ],
    },
    PageDefinition {
        name: "how-it-works",
        path: "/how-it-works",
        resource: "how-it-works-page",
        title: "How It Works",
        components: &[
            Hero::COMPONENT,
            Steps::COMPONENT,
            RichText::COMPONENT,
            Faq::COMPONENT,
            CtaBanner::COMPONENT,
        ],
    },
    PageDefinition {
        name: "pricing",
        path: "/pricing",
        resource: "pricing-page",
        title: "Pricing",
        components: &[
            Hero::COMPONENT,
            PricingTable::COMPONENT,
            Faq::COMPONENT,
            CtaBanner::COMPONENT,
        ],
    },
    PageDefinition {
        name: "about",
        path: "/about",
        resource: "about-page",
        title: "About Us",
        components: &[Hero::COMPONENT, RichText::COMPONENT, Testimonials::COMPONENT],
    },
    PageDefinition {
        name: "contact",
        path: "/contact",
        resource: "contact-page",
        title: "Contact",
        components: &[Hero::COMPONENT, LeadForm::COMPONENT, Faq::COMPONENT],
    },
];

/// Look up a page by URL path. Trailing slashes are ignored.
#[must_use]
pub fn by_path(path: &str) -> Option<&'static PageDefinition> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    PAGES.iter().find(|page| page.path == normalized)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_by_path_finds_root() {
        assert_eq!(by_path("/").unwrap().name, "home");
    }

    #[test]
    fn test_by_path_ignores_trailing_slash() {
        assert_eq!(by_path("/pricing/").unwrap().name, "pricing");
        assert_eq!(by_path("/pricing").unwrap().name, "pricing");
    }

    #[test]
    fn test_by_path_unknown_is_none() {
        assert!(by_path("/careers").is_none());
    }

    #[test]
    fn test_names_paths_resources_are_unique() {
        for field in [
            PAGES.iter().map(|p| p.name).collect::<Vec<_>>(),
            PAGES.iter().map(|p| p.path).collect::<Vec<_>>(),
            PAGES.iter().map(|p| p.resource).collect::<Vec<_>>(),
        ] {
            let mut sorted = field.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), field.len());
        }
    }

    #[test]
    fn test_query_names_each_component_and_seo() {
        // Dots and dashes are unreserved, so component names survive
        // encoding verbatim
        let encoded = by_path("/pricing").unwrap().query().encode();

        assert!(encoded.contains("populate%5Bseo%5D"));
        for component in [
            "shared.hero-section",
            "shared.pricing-table",
            "shared.faq-section",
            "shared.cta-banner",
        ] {
            assert!(encoded.contains(component), "missing {component}");
        }
    }
}
