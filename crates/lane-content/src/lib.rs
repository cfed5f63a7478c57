//! Content block model and rendering for Lane.
//!
//! The CMS describes every page as an ordered list of typed content blocks
//! (hero, pricing table, FAQ, ...). This crate owns the whole journey from
//! raw CMS JSON to HTML:
//!
//! - [`ContentBlock`]: one enum variant per known block type, decoded from
//!   the `__component` discriminator; unknown or malformed blocks are
//!   logged and skipped, never fatal
//! - Normalization: every block field falls back to complete hard-coded
//!   copy, so a half-filled CMS entry still renders a whole section
//! - [`render::render_blocks`]: pure block-to-HTML rendering, with the
//!   hero block hoisted to the front so every page opens with its heading
//! - [`blog`]: article/category model with the listing filter
//! - [`Global`]: site-wide content (nav, footer, chat copy, default SEO)
//!
//! Rendering is deliberately free of I/O and state; fetching and caching
//! live elsewhere.

pub mod blocks;
pub mod blog;
pub mod render;

mod global;
mod html;
mod page;

pub use blocks::{ContentBlock, parse_blocks};
pub use global::{ChatSettings, Global, NavItem};
pub use html::{escape_html, markdown_to_html};
pub use page::{Media, PageDocument, Seo};
