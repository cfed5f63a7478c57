//! Mock content source for testing.
//!
//! Provides [`MockSource`] for unit testing without a network.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use serde_json::Value;

use crate::ContentSource;
use crate::error::{CmsError, reason_phrase};
use crate::query::Query;
use crate::types::{Envelope, Meta};

/// Failure injected for a resource.
#[derive(Debug, Clone, Copy)]
enum Failure {
    Timeout,
    Status(u16),
}

/// Mock content source for testing.
///
/// Serves documents from memory. Use the builder methods to configure
/// documents, injected failures and artificial latency; the call counters
/// let tests assert how often a resource was actually fetched.
///
/// # Example
///
/// ```ignore
/// use lane_cms::{ContentSource, MockSource, Query};
/// use serde_json::json;
///
/// let source = MockSource::new()
///     .with_document("home-page", json!({ "title": "Home" }))
///     .with_status("pricing-page", 503);
///
/// let envelope = source.fetch("home-page", &Query::new()).unwrap();
/// assert_eq!(source.fetch_count("home-page"), 1);
/// ```
#[derive(Debug)]
pub struct MockSource {
    documents: RwLock<HashMap<String, Value>>,
    failures: RwLock<HashMap<String, (usize, Failure)>>,
    calls: RwLock<HashMap<String, usize>>,
    last_queries: RwLock<HashMap<String, String>>,
    created: RwLock<HashMap<String, Vec<Value>>>,
    delay: RwLock<Option<Duration>>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            calls: RwLock::new(HashMap::new()),
            last_queries: RwLock::new(HashMap::new()),
            created: RwLock::new(HashMap::new()),
            delay: RwLock::new(None),
        }
    }
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `data` as the document payload for a resource.
    ///
    /// Pass an object for single types, an array for collections.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, resource: impl Into<String>, data: Value) -> Self {
        self.documents.write().unwrap().insert(resource.into(), data);
        self
    }

    /// Always answer a resource with an HTTP error status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, resource: impl Into<String>, status: u16) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(resource.into(), (usize::MAX, Failure::Status(status)));
        self
    }

    /// Fail a resource's next `count` fetches with a timeout, then serve
    /// the configured document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_transient_timeouts(self, resource: impl Into<String>, count: usize) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(resource.into(), (count, Failure::Timeout));
        self
    }

    /// Sleep for `delay` before answering any fetch.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write().unwrap() = Some(delay);
        self
    }

    /// How many times a resource was fetched.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fetch_count(&self, resource: &str) -> usize {
        self.calls.read().unwrap().get(resource).copied().unwrap_or(0)
    }

    /// The encoded query string of the most recent fetch of a resource.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn last_query(&self, resource: &str) -> Option<String> {
        self.last_queries.read().unwrap().get(resource).cloned()
    }

    /// Entries created in a collection, in submission order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn created(&self, resource: &str) -> Vec<Value> {
        self.created
            .read()
            .unwrap()
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Serve the injected failure for a resource, if one is armed.
    fn take_failure(&self, resource: &str) -> Option<CmsError> {
        let mut failures = self.failures.write().unwrap();
        if let Some((remaining, failure)) = failures.get_mut(resource)
            && *remaining > 0
        {
            *remaining = remaining.saturating_sub(1);
            return Some(match *failure {
                Failure::Timeout => CmsError::Timeout,
                Failure::Status(status) => CmsError::Status {
                    status,
                    reason: reason_phrase(status),
                },
            });
        }
        None
    }
}

impl ContentSource for MockSource {
    fn fetch(&self, resource: &str, query: &Query) -> Result<Envelope<Value>, CmsError> {
        *self
            .calls
            .write()
            .unwrap()
            .entry(resource.to_owned())
            .or_insert(0) += 1;
        self.last_queries
            .write()
            .unwrap()
            .insert(resource.to_owned(), query.encode());

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        if let Some(err) = self.take_failure(resource) {
            return Err(err);
        }

        match self.documents.read().unwrap().get(resource) {
            Some(data) => Ok(Envelope {
                data: Some(data.clone()),
                meta: Meta::default(),
            }),
            None => Err(CmsError::Status {
                status: 404,
                reason: reason_phrase(404),
            }),
        }
    }

    fn create(&self, resource: &str, fields: &Value) -> Result<Envelope<Value>, CmsError> {
        if let Some(err) = self.take_failure(resource) {
            return Err(err);
        }

        self.created
            .write()
            .unwrap()
            .entry(resource.to_owned())
            .or_default()
            .push(fields.clone());

        // Echo the entry back like the real API does
        Ok(Envelope {
            data: Some(fields.clone()),
            meta: Meta::default(),
        })
    }
}
