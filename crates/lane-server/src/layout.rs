//! Page shell composition.
//!
//! Wraps rendered content blocks with the site chrome: head metadata
//! (title, description, Open Graph), header navigation, footer, and the
//! chat launcher. All CMS-sourced text is escaped here; the body argument
//! is already-rendered HTML and passes through untouched.

use std::fmt::Write;

use lane_content::{Global, Seo, escape_html};

/// Inline stylesheet. Small enough that a separate asset round trip
/// would cost more than it saves.
const STYLE: &str = "\
:root{--ink:#16212d;--accent:#0b6bcb;--paper:#fff;font-family:system-ui,sans-serif}\
body{margin:0;color:var(--ink);background:var(--paper);line-height:1.6}\
header,main,footer{max-width:960px;margin:0 auto;padding:0 1rem}\
header{display:flex;align-items:center;justify-content:space-between;padding:1rem}\
header nav a{margin-left:1rem;text-decoration:none;color:var(--ink)}\
a.cta,button{background:var(--accent);color:#fff;border:0;border-radius:4px;padding:.6rem 1.2rem;text-decoration:none;cursor:pointer}\
section{margin:2.5rem 0}\
section.hero{text-align:center;padding:3rem 0}\
.tiers{display:flex;gap:1.5rem;flex-wrap:wrap}\
.tier{flex:1 1 240px;border:1px solid #d5dbe2;border-radius:8px;padding:1rem}\
.price{font-size:1.4rem;font-weight:700}\
form.lead-form label,section.lead-form label{display:block;margin:.6rem 0}\
input{width:100%;max-width:420px;padding:.5rem;border:1px solid #d5dbe2;border-radius:4px}\
figure{margin:1rem 0;border-left:3px solid var(--accent);padding-left:1rem}\
.detail{color:#5b6774;margin-left:.5rem}\
footer{padding:2rem 1rem;color:#5b6774;border-top:1px solid #e3e8ee;margin-top:3rem}\
#chat-launcher{position:fixed;right:1.5rem;bottom:1.5rem}";

/// Compose a full HTML document around a rendered body.
pub(crate) fn page_shell(global: &Global, title: &str, seo: Option<&Seo>, body: &str) -> String {
    let title = shell_title(global, title, seo);
    let description = shell_description(global, seo);
    let image = share_image_url(global, seo);

    let mut out = String::with_capacity(body.len() + 2048);
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&title));
    let _ = writeln!(
        out,
        r#"<meta name="description" content="{}">"#,
        escape_html(&description)
    );
    let _ = writeln!(
        out,
        r#"<meta property="og:title" content="{}">"#,
        escape_html(&title)
    );
    let _ = writeln!(
        out,
        r#"<meta property="og:description" content="{}">"#,
        escape_html(&description)
    );
    let _ = writeln!(
        out,
        r#"<meta property="og:site_name" content="{}">"#,
        escape_html(&global.site_name)
    );
    out.push_str("<meta property=\"og:type\" content=\"website\">\n");
    if let Some(url) = image {
        let _ = writeln!(
            out,
            r#"<meta property="og:image" content="{}">"#,
            escape_html(url)
        );
    }
    let _ = writeln!(out, "<style>{STYLE}</style>");
    out.push_str("</head>\n<body>\n");

    header(&mut out, global);
    let _ = writeln!(out, "<main>\n{body}\n</main>");
    footer(&mut out, global);
    chat_launcher(&mut out, global);

    out.push_str("</body>\n</html>\n");
    out
}

/// Document title: the page SEO title wins, otherwise `page | site`.
fn shell_title(global: &Global, page_title: &str, seo: Option<&Seo>) -> String {
    seo.and_then(|s| s.meta_title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("{page_title} | {}", global.site_name))
}

/// Meta description: page SEO, then the site default SEO, then the tagline.
fn shell_description(global: &Global, seo: Option<&Seo>) -> String {
    seo.and_then(|s| s.meta_description.clone())
        .filter(|d| !d.is_empty())
        .or_else(|| {
            global
                .default_seo
                .as_ref()
                .and_then(|s| s.meta_description.clone())
                .filter(|d| !d.is_empty())
        })
        .unwrap_or_else(|| global.tagline.clone())
}

/// Share image: page SEO first, then the site default SEO.
fn share_image_url<'a>(global: &'a Global, seo: Option<&'a Seo>) -> Option<&'a str> {
    seo.and_then(|s| s.share_image.as_ref())
        .or_else(|| global.default_seo.as_ref().and_then(|s| s.share_image.as_ref()))
        .map(|media| media.url.as_str())
        .filter(|url| !url.is_empty())
}

fn header(out: &mut String, global: &Global) {
    let _ = write!(
        out,
        r#"<header><a class="brand" href="/">{}</a><nav>"#,
        escape_html(&global.site_name)
    );
    for item in &global.nav {
        let _ = write!(
            out,
            r#"<a href="{}">{}</a>"#,
            escape_html(&item.href),
            escape_html(&item.label),
        );
    }
    let phone_href: String = global
        .phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let _ = writeln!(
        out,
        r#"<a href="tel:{}">{}</a></nav></header>"#,
        escape_html(&phone_href),
        escape_html(&global.phone),
    );
}

fn footer(out: &mut String, global: &Global) {
    let _ = writeln!(
        out,
        "<footer><p>{}</p><p>{} &middot; {}</p></footer>",
        escape_html(&global.footer_text),
        escape_html(&global.site_name),
        escape_html(&global.phone),
    );
}

/// Launcher mount point; the widget script reads its copy and timing from
/// the data attributes.
fn chat_launcher(out: &mut String, global: &Global) {
    let _ = writeln!(
        out,
        r#"<div id="chat-launcher" data-greeting="{}" data-reply="{}" data-reply-delay-ms="{}"><button type="button" aria-expanded="false">Chat with us</button></div>"#,
        escape_html(&global.chat.greeting),
        escape_html(&global.chat.reply),
        global.chat.reply_delay_ms,
    );
}

/// Body shown when the CMS gives us nothing usable.
pub(crate) fn fallback_body() -> String {
    r#"<section class="fallback"><h2>No content available</h2><p>We are having trouble loading this page right now. Please try again in a moment, or give us a call.</p></section>"#.to_owned()
}

/// Body for unknown paths.
pub(crate) fn not_found_body() -> String {
    r#"<section class="not-found"><h2>Page not found</h2><p>That page does not exist. <a href="/">Back to the home page</a>.</p></section>"#.to_owned()
}

/// Body confirming a quote request, with the lead form's success copy.
pub(crate) fn quote_success_body(message: &str) -> String {
    format!(
        r#"<section class="quote-success"><h2>Request received</h2><p>{}</p><p><a href="/">Back to the home page</a></p></section>"#,
        escape_html(message)
    )
}

/// Body shown when a quote request could not be forwarded.
pub(crate) fn quote_failure_body() -> String {
    r#"<section class="quote-failure"><h2>Something went wrong</h2><p>We could not send your request just now. Please try again in a moment, or give us a call instead.</p></section>"#.to_owned()
}
