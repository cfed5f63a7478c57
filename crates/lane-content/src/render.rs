//! HTML rendering for content blocks.
//!
//! Each block renders to one `<section>` whose class names the block type.
//! All CMS-sourced text passes through [`escape_html`] except the rich text
//! body, which is markdown and owns its own escaping.
//!
//! The hero block is the only one that renders an `<h1>`, so a page keeps a
//! single top-level heading no matter how editors arrange the blocks.

use std::fmt::Write;

use crate::blocks::{
    ContentBlock, CtaBanner, Faq, Hero, LeadForm, PricingTable, RichText, Steps, Testimonials,
};
use crate::html::{escape_html, markdown_to_html};

/// Move the first hero block to the front of the list.
///
/// Blocks ahead of the hero keep their relative order (they shift down by
/// one), and anything after the hero is untouched. A list without a hero,
/// or with the hero already leading, comes back unchanged. Applying this
/// twice is the same as applying it once.
pub fn hero_first(blocks: &mut [ContentBlock]) {
    if let Some(pos) = blocks.iter().position(ContentBlock::is_hero)
        && pos > 0
    {
        blocks[..=pos].rotate_right(1);
    }
}

/// Render one block to an HTML section.
#[must_use]
pub fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Hero(hero) => render_hero(hero),
        ContentBlock::RichText(text) => render_rich_text(text),
        ContentBlock::Steps(steps) => render_steps(steps),
        ContentBlock::PricingTable(table) => render_pricing_table(table),
        ContentBlock::Faq(faq) => render_faq(faq),
        ContentBlock::Testimonials(testimonials) => render_testimonials(testimonials),
        ContentBlock::LeadForm(form) => render_lead_form(form),
        ContentBlock::CtaBanner(banner) => render_cta_banner(banner),
    }
}

/// Render a block list in order, one section per line.
#[must_use]
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a page body: hoist the hero, then render everything in order.
#[must_use]
pub fn render_page_body(mut blocks: Vec<ContentBlock>) -> String {
    hero_first(&mut blocks);
    render_blocks(&blocks)
}

fn render_hero(hero: &Hero) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section class="hero"><h1>{}</h1><p class="subheading">{}</p><a class="cta" href="{}">{}</a></section>"#,
        escape_html(&hero.heading),
        escape_html(&hero.subheading),
        escape_html(&hero.cta_href),
        escape_html(&hero.cta_label),
    );
    out
}

fn render_rich_text(text: &RichText) -> String {
    let mut out = String::from(r#"<section class="rich-text">"#);
    out.push_str(&markdown_to_html(&text.body));
    out.push_str("</section>");
    out
}

fn render_steps(steps: &Steps) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section class="steps"><h2>{}</h2><ol>"#,
        escape_html(&steps.title)
    );
    for step in &steps.steps {
        let _ = write!(
            out,
            "<li><h3>{}</h3><p>{}</p></li>",
            escape_html(&step.title),
            escape_html(&step.description),
        );
    }
    out.push_str("</ol></section>");
    out
}

fn render_pricing_table(table: &PricingTable) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section class="pricing"><h2>{}</h2><div class="tiers">"#,
        escape_html(&table.title)
    );
    for tier in &table.tiers {
        let _ = write!(
            out,
            r#"<div class="tier"><h3>{}</h3><p class="price">{}</p><p>{}</p><ul>"#,
            escape_html(&tier.name),
            escape_html(&tier.price),
            escape_html(&tier.description),
        );
        for feature in &tier.features {
            let _ = write!(out, "<li>{}</li>", escape_html(feature));
        }
        out.push_str("</ul></div>");
    }
    out.push_str("</div></section>");
    out
}

fn render_faq(faq: &Faq) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section class="faq"><h2>{}</h2>"#,
        escape_html(&faq.title)
    );
    for item in &faq.items {
        let _ = write!(
            out,
            "<details><summary>{}</summary><p>{}</p></details>",
            escape_html(&item.question),
            escape_html(&item.answer),
        );
    }
    out.push_str("</section>");
    out
}

fn render_testimonials(testimonials: &Testimonials) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section class="testimonials"><h2>{}</h2>"#,
        escape_html(&testimonials.title)
    );
    for quote in &testimonials.quotes {
        let _ = write!(
            out,
            "<figure><blockquote><p>{}</p></blockquote><figcaption>{}",
            escape_html(&quote.quote),
            escape_html(&quote.author),
        );
        if let Some(detail) = &quote.detail {
            let _ = write!(out, r#"<span class="detail">{}</span>"#, escape_html(detail));
        }
        out.push_str("</figcaption></figure>");
    }
    out.push_str("</section>");
    out
}

fn render_lead_form(form: &LeadForm) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section class="lead-form"><h2>{}</h2><form method="post" action="/quote">"#,
        escape_html(&form.title)
    );
    out.push_str(r#"<label>Full name<input type="text" name="name" required></label>"#);
    out.push_str(r#"<label>Email<input type="email" name="email" required></label>"#);
    out.push_str(r#"<label>Phone<input type="tel" name="phone"></label>"#);
    out.push_str(r#"<label>Pickup ZIP<input type="text" name="pickup_zip" required></label>"#);
    out.push_str(r#"<label>Delivery ZIP<input type="text" name="delivery_zip" required></label>"#);
    out.push_str(
        r#"<label>Vehicle<input type="text" name="vehicle" placeholder="2021 Honda Accord"></label>"#,
    );
    let _ = write!(
        out,
        r#"<button type="submit">{}</button></form></section>"#,
        escape_html(&form.button_label)
    );
    out
}

fn render_cta_banner(banner: &CtaBanner) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section class="cta-banner"><h2>{}</h2><p>{}</p><a class="cta" href="{}">{}</a></section>"#,
        escape_html(&banner.heading),
        escape_html(&banner.body),
        escape_html(&banner.cta_href),
        escape_html(&banner.cta_label),
    );
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::blocks::Testimonial;

    fn hero_named(heading: &str) -> ContentBlock {
        ContentBlock::Hero(Hero {
            heading: heading.to_owned(),
            ..Hero::default()
        })
    }

    fn rich(body: &str) -> ContentBlock {
        ContentBlock::RichText(RichText {
            body: body.to_owned(),
        })
    }

    #[test]
    fn test_hero_first_moves_hero_to_front() {
        let mut blocks = vec![rich("a"), rich("b"), hero_named("h"), rich("c")];

        hero_first(&mut blocks);

        assert_eq!(blocks[0], hero_named("h"));
        // Blocks before the hero keep their relative order
        assert_eq!(blocks[1], rich("a"));
        assert_eq!(blocks[2], rich("b"));
        assert_eq!(blocks[3], rich("c"));
    }

    #[test]
    fn test_hero_first_no_hero_unchanged() {
        let mut blocks = vec![rich("a"), rich("b")];
        let expected = blocks.clone();

        hero_first(&mut blocks);

        assert_eq!(blocks, expected);
    }

    #[test]
    fn test_hero_first_already_leading_unchanged() {
        let mut blocks = vec![hero_named("h"), rich("a"), rich("b")];
        let expected = blocks.clone();

        hero_first(&mut blocks);

        assert_eq!(blocks, expected);
    }

    #[test]
    fn test_hero_first_is_idempotent() {
        let mut once = vec![rich("a"), hero_named("h"), rich("b")];
        hero_first(&mut once);

        let mut twice = once.clone();
        hero_first(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_hero_first_moves_only_the_first_hero() {
        let mut blocks = vec![rich("a"), hero_named("h1"), hero_named("h2")];

        hero_first(&mut blocks);

        assert_eq!(blocks[0], hero_named("h1"));
        assert_eq!(blocks[1], rich("a"));
        assert_eq!(blocks[2], hero_named("h2"));
    }

    #[test]
    fn test_only_hero_renders_h1() {
        let blocks = [
            ContentBlock::Hero(Hero::default()),
            ContentBlock::RichText(RichText::default()),
            ContentBlock::Steps(Steps::default()),
            ContentBlock::PricingTable(PricingTable::default()),
            ContentBlock::Faq(Faq::default()),
            ContentBlock::Testimonials(Testimonials::default()),
            ContentBlock::LeadForm(LeadForm::default()),
            ContentBlock::CtaBanner(CtaBanner::default()),
        ];

        for block in &blocks {
            let html = render_block(block);
            let has_h1 = html.contains("<h1>");
            assert_eq!(has_h1, block.is_hero(), "unexpected h1 in {html}");
        }
    }

    #[test]
    fn test_hero_escapes_cms_text() {
        let html = render_block(&ContentBlock::Hero(Hero {
            heading: "<script>alert(1)</script>".to_owned(),
            ..Hero::default()
        }));

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_rich_text_renders_markdown() {
        let html = render_block(&rich("## Carriers\n\nWe vet *every* one."));

        assert!(html.starts_with(r#"<section class="rich-text">"#));
        assert!(html.contains("<h2>Carriers</h2>"));
        assert!(html.contains("<em>every</em>"));
    }

    #[test]
    fn test_steps_render_ordered_list() {
        let html = render_block(&ContentBlock::Steps(Steps::default()));

        assert!(html.contains("<ol>"));
        assert!(html.contains("<h3>Request a quote</h3>"));
    }

    #[test]
    fn test_faq_renders_details() {
        let html = render_block(&ContentBlock::Faq(Faq::default()));

        assert!(html.contains("<details><summary>How long does auto transport take?</summary>"));
    }

    #[test]
    fn test_lead_form_carries_all_fields() {
        let html = render_block(&ContentBlock::LeadForm(LeadForm::default()));

        for name in ["name", "email", "phone", "pickup_zip", "delivery_zip", "vehicle"] {
            assert!(html.contains(&format!(r#"name="{name}""#)), "missing {name}");
        }
        assert!(html.contains(r#"action="/quote""#));
        assert!(html.contains("<button type=\"submit\">Request Quote</button>"));
    }

    #[test]
    fn test_testimonial_detail_is_optional() {
        let with = render_block(&ContentBlock::Testimonials(Testimonials::default()));
        assert!(with.contains(r#"<span class="detail">Austin to Denver</span>"#));

        let without = render_block(&ContentBlock::Testimonials(Testimonials {
            title: "Quotes".to_owned(),
            quotes: vec![Testimonial {
                quote: "Great".to_owned(),
                author: "Sam".to_owned(),
                detail: None,
            }],
        }));
        assert!(!without.contains(r#"class="detail""#));
    }

    #[test]
    fn test_render_blocks_joins_with_newline() {
        let blocks = vec![rich("a"), rich("b")];

        let html = render_blocks(&blocks);

        assert_eq!(html.matches("</section>").count(), 2);
        assert_eq!(html.matches('\n').count(), 1);
    }

    #[test]
    fn test_render_page_body_hoists_hero() {
        let html = render_page_body(vec![rich("intro"), hero_named("Lead")]);

        let hero_at = html.find(r#"class="hero""#).unwrap();
        let rich_at = html.find(r#"class="rich-text""#).unwrap();
        assert!(hero_at < rich_at);
    }
}
