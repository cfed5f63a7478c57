//! Lead-form submission handler.
//!
//! Receives the quote form posted by the lead-form block and forwards
//! it to the CMS as a new lead entry.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use lane_content::ContentBlock;
use lane_content::blocks::LeadForm;
use lane_site::{ContentService, pages};
use serde::Deserialize;
use serde_json::json;

use crate::error::ServerError;
use crate::handlers::{global_or_default, run_blocking};
use crate::layout;
use crate::state::AppState;

/// Fields posted by the quote form.
///
/// All fields default to empty so a sparse submission still goes
/// through; the sales team follows up for anything missing.
#[derive(Debug, Deserialize)]
pub(crate) struct QuoteForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    pickup_zip: String,
    #[serde(default)]
    delivery_zip: String,
    #[serde(default)]
    vehicle: String,
}

/// Handle POST /quote.
pub(crate) async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QuoteForm>,
) -> Result<Response, ServerError> {
    let worker = Arc::clone(&state);
    let (global, outcome) = run_blocking(move || {
        let global = global_or_default(&worker.service);
        let fields = json!({
            "name": form.name,
            "email": form.email,
            "phone": form.phone,
            "pickup_zip": form.pickup_zip,
            "delivery_zip": form.delivery_zip,
            "vehicle": form.vehicle,
        });
        let outcome = worker
            .service
            .submit_lead(&fields)
            .map(|()| success_message(&worker.service));
        (global, outcome)
    })
    .await?;

    match outcome {
        Ok(message) => {
            let html = layout::page_shell(
                &global,
                "Quote Requested",
                None,
                &layout::quote_success_body(&message),
            );
            Ok(Html(html).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "lead submission failed");
            let html = layout::page_shell(
                &global,
                "Quote Request",
                None,
                &layout::quote_failure_body(),
            );
            Ok(Html(html).into_response())
        }
    }
}

/// The confirmation copy configured on the contact page's lead form,
/// or the stock message when the CMS doesn't provide one.
fn success_message(service: &ContentService) -> String {
    let configured = pages::by_path("/contact")
        .and_then(|def| service.page(def).ok())
        .and_then(|page| {
            page.blocks().into_iter().find_map(|block| match block {
                ContentBlock::LeadForm(form) => Some(form.success_message),
                _ => None,
            })
        });
    configured.unwrap_or_else(|| LeadForm::default().success_message)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use lane_cache::MemoryCache;
    use lane_cms::MockSource;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::AppState;

    fn test_state(source: &Arc<MockSource>) -> Arc<AppState> {
        let service = ContentService::new(
            Arc::<MockSource>::clone(source),
            Arc::new(MemoryCache::new(Duration::from_secs(300))),
        );
        Arc::new(AppState {
            service,
            purge_token: None,
            version: "1.0.0".to_owned(),
        })
    }

    fn quote_form() -> Form<QuoteForm> {
        Form(QuoteForm {
            name: "Dana Reyes".to_owned(),
            email: "dana@example.com".to_owned(),
            phone: "512-555-0188".to_owned(),
            pickup_zip: "78701".to_owned(),
            delivery_zip: "80202".to_owned(),
            vehicle: "2021 Subaru Outback".to_owned(),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_forwards_lead_and_confirms() {
        let source = Arc::new(MockSource::new());
        let state = test_state(&source);

        let response = submit(State(state), quote_form()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let created = source.created("leads");
        assert_eq!(created.len(), 1);
        assert_eq!(created[0]["email"], "dana@example.com");
        assert_eq!(created[0]["pickup_zip"], "78701");

        let html = body_text(response).await;
        assert!(html.contains("Request received"));
        assert!(html.contains(&lane_content::escape_html(
            &LeadForm::default().success_message
        )));
    }

    #[tokio::test]
    async fn test_submit_uses_configured_success_message() {
        let source = Arc::new(MockSource::new().with_document(
            "contact-page",
            serde_json::json!({
                "title": "Contact",
                "page_content": [
                    {
                        "__component": "shared.lead-form",
                        "success_message": "A specialist calls within the hour."
                    }
                ]
            }),
        ));
        let state = test_state(&source);

        let response = submit(State(state), quote_form()).await.unwrap();

        let html = body_text(response).await;
        assert!(html.contains("A specialist calls within the hour."));
    }

    #[tokio::test]
    async fn test_submit_failure_shows_retry_page() {
        let source = Arc::new(MockSource::new().with_status("leads", 502));
        let state = test_state(&source);

        let response = submit(State(state), quote_form()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(source.created("leads").is_empty());
        let html = body_text(response).await;
        assert!(html.contains("Something went wrong"));
    }
}
