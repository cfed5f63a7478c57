//! CMS REST API client.

use std::time::Duration;

use serde_json::Value;
use ureq::Agent;

use crate::ContentSource;
use crate::error::{CmsError, reason_phrase};
use crate::query::Query;
use crate::types::Envelope;

/// HTTP timeout in seconds when the caller does not set one.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Sync HTTP client for the CMS REST API.
///
/// One client holds one connection-pooling agent with a single global
/// timeout covering connect, send and body read. Read access tokens are
/// sent as a bearer header when configured.
pub struct CmsClient {
    agent: Agent,
    base_url: String,
    api_token: Option<String>,
}

impl CmsClient {
    /// Create a client for the CMS at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - CMS base URL, with or without a trailing slash
    /// * `api_token` - Bearer token, when the CMS requires one
    /// * `timeout` - Global timeout for every request
    #[must_use]
    pub fn new(base_url: &str, api_token: Option<&str>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_token: api_token.map(str::to_owned),
        }
    }

    /// Create a client with the default timeout.
    #[must_use]
    pub fn with_default_timeout(base_url: &str, api_token: Option<&str>) -> Self {
        Self::new(base_url, api_token, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Full request URL for a resource.
    fn api_url(&self, resource: &str, query: &Query) -> String {
        let query_string = query.encode();
        if query_string.is_empty() {
            format!("{}/api/{}", self.base_url, resource)
        } else {
            format!("{}/api/{}?{}", self.base_url, resource, query_string)
        }
    }
}

impl ContentSource for CmsClient {
    fn fetch(&self, resource: &str, query: &Query) -> Result<Envelope<Value>, CmsError> {
        let url = self.api_url(resource, query);
        tracing::debug!(resource = %resource, "fetching from CMS");

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let response = request.call()?;
        let status = response.status();
        let mut body_reader = response.into_body();

        if status.as_u16() >= 400 {
            // The error body is CMS-internal detail; the status is the contract
            return Err(CmsError::Status {
                status: status.as_u16(),
                reason: reason_phrase(status.as_u16()),
            });
        }

        // Read first, decode second: a cut-off body classifies as a network
        // failure, a well-read body that isn't our JSON as a decode failure
        let body = body_reader.read_to_string()?;
        let envelope = serde_json::from_str(&body)?;
        Ok(envelope)
    }

    fn create(&self, resource: &str, fields: &Value) -> Result<Envelope<Value>, CmsError> {
        let url = self.api_url(resource, &Query::new());
        tracing::debug!(resource = %resource, "creating CMS entry");

        let payload = serde_json::to_vec(&serde_json::json!({ "data": fields }))?;

        let mut request = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let response = request.send(&payload[..])?;
        let status = response.status();
        let mut body_reader = response.into_body();

        if status.as_u16() >= 400 {
            return Err(CmsError::Status {
                status: status.as_u16(),
                reason: reason_phrase(status.as_u16()),
            });
        }

        let body = body_reader.read_to_string()?;
        let envelope = serde_json::from_str(&body)?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn client(base_url: &str) -> CmsClient {
        CmsClient::new(base_url, None, Duration::from_secs(5))
    }

    #[test]
    fn test_api_url_without_query() {
        let client = client("http://localhost:1337");
        assert_eq!(
            client.api_url("home-page", &Query::new()),
            "http://localhost:1337/api/home-page"
        );
    }

    #[test]
    fn test_api_url_with_query() {
        let client = client("http://localhost:1337");
        let query = Query::new().populate("seo");
        assert_eq!(
            client.api_url("home-page", &query),
            "http://localhost:1337/api/home-page?populate%5Bseo%5D%5Bpopulate%5D=%2A"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client("https://cms.example.com/");
        assert_eq!(
            client.api_url("articles", &Query::new()),
            "https://cms.example.com/api/articles"
        );
    }
}
