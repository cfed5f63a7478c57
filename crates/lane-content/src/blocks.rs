//! Content block types and the decoding registry.
//!
//! Every block arrives from the CMS as a JSON object carrying its type in
//! the `__component` field (e.g. `"shared.hero-section"`). [`ContentBlock::parse`]
//! matches on that discriminator and decodes the payload through a raw
//! struct whose fields are all optional; the conversion to the public type
//! is the normalization step that fills in complete fallback copy. An empty
//! string counts as absent, matching how editors clear fields in the CMS.
//!
//! Unknown discriminators and malformed payloads are warned about and
//! skipped; a bad block never takes the page down.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Discriminator field carried by every block object.
pub const COMPONENT_FIELD: &str = "__component";

/// Deserialize a value that the CMS may send as `null`, falling back to the
/// type's default. Covers both missing fields (with `#[serde(default)]`)
/// and explicit nulls.
pub(crate) fn null_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A typed content block.
///
/// One variant per known `__component` discriminator. The set is closed on
/// purpose: rendering matches exhaustively, so adding a CMS component means
/// adding a variant here and the compiler walks you to every match site.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// `shared.hero-section` - the page-opening heading block.
    Hero(Hero),
    /// `shared.rich-text` - a markdown body.
    RichText(RichText),
    /// `shared.steps-section` - numbered "how it works" steps.
    Steps(Steps),
    /// `shared.pricing-table` - transport tiers with feature lists.
    PricingTable(PricingTable),
    /// `shared.faq-section` - question/answer items.
    Faq(Faq),
    /// `shared.testimonials-section` - customer quotes.
    Testimonials(Testimonials),
    /// `shared.lead-form` - the quote request form.
    LeadForm(LeadForm),
    /// `shared.cta-banner` - closing call to action.
    CtaBanner(CtaBanner),
}

impl ContentBlock {
    /// Decode one block from its CMS JSON object.
    ///
    /// Returns `None` (with one warning) when the discriminator is missing,
    /// unknown, or the payload does not decode.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        let Some(component) = value.get(COMPONENT_FIELD).and_then(Value::as_str) else {
            tracing::warn!("content block without a {COMPONENT_FIELD} field, skipping");
            return None;
        };

        let result = match component {
            Hero::COMPONENT => {
                serde_json::from_value::<RawHero>(value.clone()).map(|raw| Self::Hero(raw.into()))
            }
            RichText::COMPONENT => serde_json::from_value::<RawRichText>(value.clone())
                .map(|raw| Self::RichText(raw.into())),
            Steps::COMPONENT => {
                serde_json::from_value::<RawSteps>(value.clone()).map(|raw| Self::Steps(raw.into()))
            }
            PricingTable::COMPONENT => serde_json::from_value::<RawPricingTable>(value.clone())
                .map(|raw| Self::PricingTable(raw.into())),
            Faq::COMPONENT => {
                serde_json::from_value::<RawFaq>(value.clone()).map(|raw| Self::Faq(raw.into()))
            }
            Testimonials::COMPONENT => serde_json::from_value::<RawTestimonials>(value.clone())
                .map(|raw| Self::Testimonials(raw.into())),
            LeadForm::COMPONENT => serde_json::from_value::<RawLeadForm>(value.clone())
                .map(|raw| Self::LeadForm(raw.into())),
            CtaBanner::COMPONENT => serde_json::from_value::<RawCtaBanner>(value.clone())
                .map(|raw| Self::CtaBanner(raw.into())),
            _ => {
                tracing::warn!(component = %component, "unknown content block type, skipping");
                return None;
            }
        };

        match result {
            Ok(block) => Some(block),
            Err(e) => {
                tracing::warn!(component = %component, error = %e, "malformed content block, skipping");
                None
            }
        }
    }

    /// The block's `__component` discriminator.
    #[must_use]
    pub fn component(&self) -> &'static str {
        match self {
            Self::Hero(_) => Hero::COMPONENT,
            Self::RichText(_) => RichText::COMPONENT,
            Self::Steps(_) => Steps::COMPONENT,
            Self::PricingTable(_) => PricingTable::COMPONENT,
            Self::Faq(_) => Faq::COMPONENT,
            Self::Testimonials(_) => Testimonials::COMPONENT,
            Self::LeadForm(_) => LeadForm::COMPONENT,
            Self::CtaBanner(_) => CtaBanner::COMPONENT,
        }
    }

    /// True for the hero block, the one block allowed to open the page.
    #[must_use]
    pub fn is_hero(&self) -> bool {
        matches!(self, Self::Hero(_))
    }
}

/// Decode an ordered block list, dropping anything unrecognized.
#[must_use]
pub fn parse_blocks(values: &[Value]) -> Vec<ContentBlock> {
    values.iter().filter_map(ContentBlock::parse).collect()
}

/// Take a value unless it is empty, otherwise build the fallback.
fn or_default(value: Option<String>, fallback: fn() -> String) -> String {
    value.filter(|s| !s.is_empty()).unwrap_or_else(fallback)
}

// --- Hero ---

/// The page-opening heading block.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub heading: String,
    pub subheading: String,
    pub cta_label: String,
    pub cta_href: String,
}

impl Hero {
    pub const COMPONENT: &'static str = "shared.hero-section";
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHero {
    heading: Option<String>,
    subheading: Option<String>,
    cta_label: Option<String>,
    cta_href: Option<String>,
}

impl From<RawHero> for Hero {
    fn from(raw: RawHero) -> Self {
        Self {
            heading: or_default(raw.heading, defaults::hero_heading),
            subheading: or_default(raw.subheading, defaults::hero_subheading),
            cta_label: or_default(raw.cta_label, defaults::cta_label),
            cta_href: or_default(raw.cta_href, defaults::cta_href),
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        RawHero::default().into()
    }
}

// --- Rich text ---

/// A markdown body block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichText {
    pub body: String,
}

impl RichText {
    pub const COMPONENT: &'static str = "shared.rich-text";
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRichText {
    body: Option<String>,
}

impl From<RawRichText> for RichText {
    fn from(raw: RawRichText) -> Self {
        Self {
            body: raw.body.unwrap_or_default(),
        }
    }
}

// --- Steps ---

/// Numbered "how it works" steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Steps {
    pub title: String,
    pub steps: Vec<Step>,
}

impl Steps {
    pub const COMPONENT: &'static str = "shared.steps-section";
}

/// One step in a [`Steps`] block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "null_or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSteps {
    title: Option<String>,
    steps: Option<Vec<Step>>,
}

impl From<RawSteps> for Steps {
    fn from(raw: RawSteps) -> Self {
        Self {
            title: or_default(raw.title, defaults::steps_title),
            steps: raw
                .steps
                .filter(|s| !s.is_empty())
                .unwrap_or_else(defaults::steps),
        }
    }
}

impl Default for Steps {
    fn default() -> Self {
        RawSteps::default().into()
    }
}

// --- Pricing table ---

/// Transport tiers with feature lists.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    pub title: String,
    pub tiers: Vec<PricingTier>,
}

impl PricingTable {
    pub const COMPONENT: &'static str = "shared.pricing-table";
}

/// One tier in a [`PricingTable`] block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PricingTier {
    #[serde(default, deserialize_with = "null_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub price: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub features: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPricingTable {
    title: Option<String>,
    tiers: Option<Vec<PricingTier>>,
}

impl From<RawPricingTable> for PricingTable {
    fn from(raw: RawPricingTable) -> Self {
        Self {
            title: or_default(raw.title, defaults::pricing_title),
            tiers: raw
                .tiers
                .filter(|t| !t.is_empty())
                .unwrap_or_else(defaults::pricing_tiers),
        }
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        RawPricingTable::default().into()
    }
}

// --- FAQ ---

/// Question/answer items.
#[derive(Debug, Clone, PartialEq)]
pub struct Faq {
    pub title: String,
    pub items: Vec<FaqItem>,
}

impl Faq {
    pub const COMPONENT: &'static str = "shared.faq-section";
}

/// One entry in a [`Faq`] block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaqItem {
    #[serde(default, deserialize_with = "null_or_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub answer: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFaq {
    title: Option<String>,
    items: Option<Vec<FaqItem>>,
}

impl From<RawFaq> for Faq {
    fn from(raw: RawFaq) -> Self {
        Self {
            title: or_default(raw.title, defaults::faq_title),
            items: raw
                .items
                .filter(|i| !i.is_empty())
                .unwrap_or_else(defaults::faq_items),
        }
    }
}

impl Default for Faq {
    fn default() -> Self {
        RawFaq::default().into()
    }
}

// --- Testimonials ---

/// Customer quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Testimonials {
    pub title: String,
    pub quotes: Vec<Testimonial>,
}

impl Testimonials {
    pub const COMPONENT: &'static str = "shared.testimonials-section";
}

/// One quote in a [`Testimonials`] block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Testimonial {
    #[serde(default, deserialize_with = "null_or_default")]
    pub quote: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub author: String,
    /// Route or context line, e.g. "Miami to Seattle".
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTestimonials {
    title: Option<String>,
    quotes: Option<Vec<Testimonial>>,
}

impl From<RawTestimonials> for Testimonials {
    fn from(raw: RawTestimonials) -> Self {
        Self {
            title: or_default(raw.title, defaults::testimonials_title),
            quotes: raw
                .quotes
                .filter(|q| !q.is_empty())
                .unwrap_or_else(defaults::testimonials),
        }
    }
}

impl Default for Testimonials {
    fn default() -> Self {
        RawTestimonials::default().into()
    }
}

// --- Lead form ---

/// The quote request form.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadForm {
    pub title: String,
    pub button_label: String,
    pub success_message: String,
}

impl LeadForm {
    pub const COMPONENT: &'static str = "shared.lead-form";
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLeadForm {
    title: Option<String>,
    button_label: Option<String>,
    success_message: Option<String>,
}

impl From<RawLeadForm> for LeadForm {
    fn from(raw: RawLeadForm) -> Self {
        Self {
            title: or_default(raw.title, defaults::lead_form_title),
            button_label: or_default(raw.button_label, defaults::lead_form_button),
            success_message: or_default(raw.success_message, defaults::lead_form_success),
        }
    }
}

impl Default for LeadForm {
    fn default() -> Self {
        RawLeadForm::default().into()
    }
}

// --- CTA banner ---

/// Closing call to action.
#[derive(Debug, Clone, PartialEq)]
pub struct CtaBanner {
    pub heading: String,
    pub body: String,
    pub cta_label: String,
    pub cta_href: String,
}

impl CtaBanner {
    pub const COMPONENT: &'static str = "shared.cta-banner";
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCtaBanner {
    heading: Option<String>,
    body: Option<String>,
    cta_label: Option<String>,
    cta_href: Option<String>,
}

impl From<RawCtaBanner> for CtaBanner {
    fn from(raw: RawCtaBanner) -> Self {
        Self {
            heading: or_default(raw.heading, defaults::cta_banner_heading),
            body: or_default(raw.body, defaults::cta_banner_body),
            cta_label: or_default(raw.cta_label, defaults::cta_label),
            cta_href: or_default(raw.cta_href, defaults::cta_href),
        }
    }
}

impl Default for CtaBanner {
    fn default() -> Self {
        RawCtaBanner::default().into()
    }
}

/// Fallback copy used when the CMS leaves a field empty.
///
/// The site must never render a blank section, so every block type can be
/// built entirely from these.
mod defaults {
    use super::{FaqItem, PricingTier, Step, Testimonial};

    pub(super) fn hero_heading() -> String {
        "Ship Your Car With Confidence".to_owned()
    }

    pub(super) fn hero_subheading() -> String {
        "Door-to-door auto transport across the lower 48, fully insured and tracked from pickup to delivery.".to_owned()
    }

    pub(super) fn cta_label() -> String {
        "Get a Free Quote".to_owned()
    }

    pub(super) fn cta_href() -> String {
        "/contact".to_owned()
    }

    pub(super) fn steps_title() -> String {
        "How It Works".to_owned()
    }

    pub(super) fn steps() -> Vec<Step> {
        vec![
            Step {
                title: "Request a quote".to_owned(),
                description: "Tell us where your vehicle is and where it needs to go.".to_owned(),
            },
            Step {
                title: "Book your pickup".to_owned(),
                description: "Pick a date window and we dispatch a vetted carrier.".to_owned(),
            },
            Step {
                title: "Track to delivery".to_owned(),
                description: "Follow your shipment door to door and pay on delivery.".to_owned(),
            },
        ]
    }

    pub(super) fn pricing_title() -> String {
        "Transport Options".to_owned()
    }

    pub(super) fn pricing_tiers() -> Vec<PricingTier> {
        vec![
            PricingTier {
                name: "Open Transport".to_owned(),
                price: "from $699".to_owned(),
                description: "The standard choice for most vehicles.".to_owned(),
                features: vec![
                    "Door-to-door delivery".to_owned(),
                    "Full carrier insurance".to_owned(),
                    "5-7 day coast-to-coast".to_owned(),
                ],
            },
            PricingTier {
                name: "Enclosed Transport".to_owned(),
                price: "from $1,099".to_owned(),
                description: "Weather and road debris protection for high-value vehicles."
                    .to_owned(),
                features: vec![
                    "Fully enclosed trailer".to_owned(),
                    "Premium insurance coverage".to_owned(),
                    "Soft tie-down straps".to_owned(),
                ],
            },
        ]
    }

    pub(super) fn faq_title() -> String {
        "Frequently Asked Questions".to_owned()
    }

    pub(super) fn faq_items() -> Vec<FaqItem> {
        vec![
            FaqItem {
                question: "How long does auto transport take?".to_owned(),
                answer: "Coast-to-coast moves typically run 7-10 days; shorter routes deliver in 1-5 days.".to_owned(),
            },
            FaqItem {
                question: "Is my vehicle insured during shipping?".to_owned(),
                answer: "Yes. Every carrier we dispatch holds cargo insurance, and coverage is verified before pickup.".to_owned(),
            },
        ]
    }

    pub(super) fn testimonials_title() -> String {
        "What Our Customers Say".to_owned()
    }

    pub(super) fn testimonials() -> Vec<Testimonial> {
        vec![Testimonial {
            quote: "Picked up on a Tuesday, delivered that Friday. Zero surprises.".to_owned(),
            author: "Dana R.".to_owned(),
            detail: Some("Austin to Denver".to_owned()),
        }]
    }

    pub(super) fn lead_form_title() -> String {
        "Get Your Free Quote".to_owned()
    }

    pub(super) fn lead_form_button() -> String {
        "Request Quote".to_owned()
    }

    pub(super) fn lead_form_success() -> String {
        "Thanks! A shipping specialist will be in touch within one business day.".to_owned()
    }

    pub(super) fn cta_banner_heading() -> String {
        "Ready to Ship Your Car?".to_owned()
    }

    pub(super) fn cta_banner_body() -> String {
        "Lock in today's rate and get on the schedule in minutes.".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_hero() {
        let value = json!({
            "__component": "shared.hero-section",
            "heading": "Coast to Coast",
            "subheading": "We move cars.",
            "cta_label": "Start",
            "cta_href": "/quote"
        });

        let block = ContentBlock::parse(&value).unwrap();
        let ContentBlock::Hero(hero) = block else {
            panic!("expected hero, got {block:?}");
        };
        assert_eq!(hero.heading, "Coast to Coast");
        assert_eq!(hero.cta_href, "/quote");
    }

    #[test]
    fn test_parse_unknown_component() {
        let value = json!({ "__component": "shared.video-embed", "url": "x" });
        assert_eq!(ContentBlock::parse(&value), None);
    }

    #[test]
    fn test_parse_missing_component_field() {
        let value = json!({ "heading": "No type" });
        assert_eq!(ContentBlock::parse(&value), None);
    }

    #[test]
    fn test_parse_malformed_payload() {
        // steps must be a list, not a string
        let value = json!({ "__component": "shared.steps-section", "steps": "oops" });
        assert_eq!(ContentBlock::parse(&value), None);
    }

    #[test]
    fn test_empty_hero_payload_gets_fallback_copy() {
        let value = json!({ "__component": "shared.hero-section" });

        let block = ContentBlock::parse(&value).unwrap();
        let ContentBlock::Hero(hero) = block else {
            panic!("expected hero");
        };
        assert_eq!(hero.heading, "Ship Your Car With Confidence");
        assert_eq!(hero.cta_label, "Get a Free Quote");
        assert_eq!(hero, Hero::default());
    }

    #[test]
    fn test_null_fields_fall_back_like_missing() {
        let value = json!({
            "__component": "shared.hero-section",
            "heading": null,
            "subheading": "Real subheading",
            "cta_label": "",
        });

        let ContentBlock::Hero(hero) = ContentBlock::parse(&value).unwrap() else {
            panic!("expected hero");
        };
        assert_eq!(hero.heading, Hero::default().heading);
        assert_eq!(hero.subheading, "Real subheading");
        // Empty string counts as absent too
        assert_eq!(hero.cta_label, Hero::default().cta_label);
    }

    #[test]
    fn test_empty_list_fields_fall_back() {
        let value = json!({ "__component": "shared.faq-section", "items": [] });

        let ContentBlock::Faq(faq) = ContentBlock::parse(&value).unwrap() else {
            panic!("expected faq");
        };
        assert!(!faq.items.is_empty());
        assert_eq!(faq, Faq::default());
    }

    #[test]
    fn test_item_fields_tolerate_null() {
        let value = json!({
            "__component": "shared.pricing-table",
            "tiers": [{ "name": "Open", "price": null, "features": null }]
        });

        let ContentBlock::PricingTable(table) = ContentBlock::parse(&value).unwrap() else {
            panic!("expected pricing table");
        };
        assert_eq!(table.tiers.len(), 1);
        assert_eq!(table.tiers[0].name, "Open");
        assert_eq!(table.tiers[0].price, "");
        assert!(table.tiers[0].features.is_empty());
    }

    #[test]
    fn test_every_default_block_is_fully_populated() {
        let hero = Hero::default();
        assert!(!hero.heading.is_empty());
        assert!(!hero.subheading.is_empty());
        assert!(!hero.cta_label.is_empty());
        assert!(!hero.cta_href.is_empty());

        assert!(!Steps::default().steps.is_empty());
        assert!(!PricingTable::default().tiers.is_empty());
        assert!(!Faq::default().items.is_empty());
        assert!(!Testimonials::default().quotes.is_empty());

        let form = LeadForm::default();
        assert!(!form.title.is_empty());
        assert!(!form.button_label.is_empty());
        assert!(!form.success_message.is_empty());

        let banner = CtaBanner::default();
        assert!(!banner.heading.is_empty());
        assert!(!banner.cta_label.is_empty());
    }

    #[test]
    fn test_parse_blocks_skips_unknown_keeps_order() {
        let values = vec![
            json!({ "__component": "shared.rich-text", "body": "first" }),
            json!({ "__component": "shared.video-embed" }),
            json!({ "__component": "shared.rich-text", "body": "second" }),
        ];

        let blocks = parse_blocks(&values);
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            ContentBlock::RichText(RichText {
                body: "first".to_owned()
            })
        );
        assert_eq!(
            blocks[1],
            ContentBlock::RichText(RichText {
                body: "second".to_owned()
            })
        );
    }

    #[test]
    fn test_component_accessor_round_trips() {
        let values = [
            json!({ "__component": "shared.hero-section" }),
            json!({ "__component": "shared.rich-text" }),
            json!({ "__component": "shared.steps-section" }),
            json!({ "__component": "shared.pricing-table" }),
            json!({ "__component": "shared.faq-section" }),
            json!({ "__component": "shared.testimonials-section" }),
            json!({ "__component": "shared.lead-form" }),
            json!({ "__component": "shared.cta-banner" }),
        ];

        for value in &values {
            let expected = value[COMPONENT_FIELD].as_str().unwrap();
            let block = ContentBlock::parse(value).unwrap();
            assert_eq!(block.component(), expected);
        }
    }
}
