//! Blog listing and article handlers.
//!
//! The listing filters server-side from `q` and `category` query
//! parameters; articles are looked up by slug and rendered from their
//! Markdown body.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use lane_content::blog::{ALL_POSTS, Article, Category, default_category, filter_articles};
use lane_content::{escape_html, markdown_to_html};
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::pages::cacheable_html;
use crate::handlers::{global_or_default, run_blocking};
use crate::layout;
use crate::state::AppState;

/// Query parameters for GET /blog.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingParams {
    /// Free-text search term.
    #[serde(default)]
    q: String,
    /// Active category name; absent means the listing's default.
    category: Option<String>,
}

/// Handle GET /blog.
pub(crate) async fn listing(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> Result<Response, ServerError> {
    let worker = Arc::clone(&state);
    let (global, articles, categories) = run_blocking(move || {
        let global = global_or_default(&worker.service);
        let articles = worker.service.articles();
        let categories = worker.service.categories().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "category fetch failed, listing without filter options");
            Vec::new()
        });
        (global, articles, categories)
    })
    .await?;

    match articles {
        Ok(articles) => {
            let active = params
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| default_category(&categories));
            let hits = filter_articles(&articles, &params.q, &active);
            let body = listing_body(&params.q, &active, &categories, &hits);
            let html = layout::page_shell(&global, "Blog", None, &body);
            Ok(Html(html).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "article listing fetch failed, serving fallback");
            let html = layout::page_shell(&global, "Blog", None, &layout::fallback_body());
            Ok(Html(html).into_response())
        }
    }
}

/// Handle GET /blog/{slug}.
pub(crate) async fn article(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let worker = Arc::clone(&state);
    let lookup = slug.clone();
    let (global, found) = run_blocking(move || {
        let global = global_or_default(&worker.service);
        let found = worker.service.article_by_slug(&lookup);
        (global, found)
    })
    .await?;

    match found {
        Ok(Some(article)) => {
            let body = article_body(&article);
            let html = layout::page_shell(&global, &article.title, None, &body);
            Ok(cacheable_html(
                &state.version,
                html,
                article.published_at.as_deref(),
                &headers,
            ))
        }
        Ok(None) => {
            let html = layout::page_shell(
                &global,
                "Article Not Found",
                None,
                &layout::not_found_body(),
            );
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
        Err(e) => {
            tracing::warn!(slug = %slug, error = %e, "article fetch failed, serving fallback");
            let html = layout::page_shell(&global, "Blog", None, &layout::fallback_body());
            Ok(Html(html).into_response())
        }
    }
}

/// Render the listing body: filter form plus matching article cards.
fn listing_body(search: &str, active: &str, categories: &[Category], hits: &[&Article]) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"blog-listing\">\n<h1>From the Blog</h1>\n");

    let _ = write!(
        out,
        "<form class=\"blog-filters\" method=\"get\" action=\"/blog\">\n\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search articles\">\n\
         <select name=\"category\">\n",
        escape_html(search)
    );
    let mut names: Vec<&str> = vec![ALL_POSTS];
    names.extend(
        categories
            .iter()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty() && *n != ALL_POSTS),
    );
    for name in names {
        let selected = if name == active { " selected" } else { "" };
        let _ = writeln!(
            out,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape_html(name),
            selected
        );
    }
    out.push_str("</select>\n<button type=\"submit\">Filter</button>\n</form>\n");

    if hits.is_empty() {
        out.push_str("<p class=\"no-results\">No articles match your search.</p>\n");
    } else {
        out.push_str("<ul class=\"articles\">\n");
        for article in hits {
            article_card(&mut out, article);
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</section>");
    out
}

/// Render one listing entry.
fn article_card(out: &mut String, article: &Article) {
    out.push_str("<li class=\"article-card\">\n");
    let _ = writeln!(
        out,
        "<h2><a href=\"/blog/{}\">{}</a></h2>",
        escape_html(&article.slug),
        escape_html(&article.title)
    );
    if let Some(category) = &article.category
        && !category.name.is_empty()
    {
        let _ = writeln!(
            out,
            "<span class=\"category\">{}</span>",
            escape_html(&category.name)
        );
    }
    if let Some(date) = article.published_at.as_deref().and_then(display_date) {
        let _ = writeln!(out, "<time>{date}</time>");
    }
    if !article.excerpt.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape_html(&article.excerpt));
    }
    out.push_str("</li>\n");
}

/// Render a full article page from its Markdown body.
fn article_body(article: &Article) -> String {
    let mut out = String::new();
    out.push_str("<article class=\"blog-article\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&article.title));

    let mut meta = Vec::new();
    if let Some(category) = &article.category
        && !category.name.is_empty()
    {
        meta.push(format!(
            "<span class=\"category\">{}</span>",
            escape_html(&category.name)
        ));
    }
    if let Some(date) = article.published_at.as_deref().and_then(display_date) {
        meta.push(format!("<time>{date}</time>"));
    }
    if !meta.is_empty() {
        let _ = writeln!(out, "<p class=\"article-meta\">{}</p>", meta.join(" "));
    }

    out.push_str(&markdown_to_html(&article.body));
    out.push_str("\n<p><a href=\"/blog\">&larr; Back to the blog</a></p>\n</article>");
    out
}

/// Format a CMS timestamp for display, e.g. "June 1, 2025".
fn display_date(timestamp: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(parsed.with_timezone(&Utc).format("%B %-d, %Y").to_string())
}
