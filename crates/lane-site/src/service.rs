//! Cached content fetching with per-key fetch state.
//!
//! The service wraps a [`ContentSource`] with:
//!
//! - a cache bucket keyed by logical page name; a cached document inside
//!   its staleness window is served without touching the CMS
//! - single-flight deduplication: concurrent requests for one key share
//!   one CMS round trip and its settled result; different keys never
//!   contend
//! - one retry for transport failures (network, timeout); error statuses
//!   and decode failures are surfaced on the first attempt
//! - errors are never cached; a failed key stays empty and the next
//!   request starts a fresh attempt
//!
//! [`ContentService::purge`] clears cached documents and settled error
//! states in one step.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use lane_cache::{Cache, CacheBucket, CacheBucketExt};
use lane_cms::{ContentSource, Query};
use lane_content::blog::{Article, Category};
use lane_content::{Global, PageDocument};
use serde_json::Value;

use crate::error::FetchError;
use crate::pages::PageDefinition;

/// Bucket holding every cached CMS document.
const BUCKET: &str = "documents";

const GLOBAL_KEY: &str = "global";
const GLOBAL_RESOURCE: &str = "global";
const ARTICLES_KEY: &str = "articles";
const ARTICLES_RESOURCE: &str = "articles";
const CATEGORIES_KEY: &str = "categories";
const CATEGORIES_RESOURCE: &str = "categories";
const LEADS_RESOURCE: &str = "leads";

/// What the service knows about a cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// A fetch for this key is in flight.
    Pending,
    /// Fresh data is cached.
    Ready,
    /// The last attempt settled with this error; cleared by the next
    /// attempt or a purge.
    Failed(FetchError),
}

/// A successfully fetched document.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub value: Value,
    /// Whether the document came out of the cache rather than the CMS.
    pub from_cache: bool,
}

/// One in-flight fetch that concurrent callers can wait on.
struct Flight {
    result: Mutex<Option<Result<Value, FetchError>>>,
    done: Condvar,
}

impl Flight {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn settle(&self, result: Result<Value, FetchError>) {
        *self.result.lock().unwrap() = Some(result);
        self.done.notify_all();
    }

    fn wait(&self) -> Result<Value, FetchError> {
        let mut guard = self.result.lock().unwrap();
        loop {
            if let Some(result) = guard.as_ref() {
                return result.clone();
            }
            guard = self.done.wait(guard).unwrap();
        }
    }
}

/// Cached, deduplicated access to CMS documents.
pub struct ContentService {
    source: Arc<dyn ContentSource>,
    cache: Arc<dyn Cache>,
    bucket: Box<dyn CacheBucket>,
    flights: Mutex<HashMap<String, Arc<Flight>>>,
    errors: Mutex<HashMap<String, FetchError>>,
}

impl ContentService {
    /// Create a service over a content source and a cache.
    ///
    /// The cache decides the staleness window; pass
    /// [`lane_cache::NullCache`] to disable caching entirely.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, cache: Arc<dyn Cache>) -> Self {
        let bucket = cache.bucket(BUCKET);
        Self {
            source,
            cache,
            bucket,
            flights: Mutex::new(HashMap::new()),
            errors: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a document by cache key, deduplicating concurrent requests.
    ///
    /// # Errors
    ///
    /// Returns the settled [`FetchError`] when the fetch fails after the
    /// transport retry. Failures are never written to the cache.
    ///
    /// # Panics
    ///
    /// Panics if an internal lock is poisoned.
    pub fn document(
        &self,
        key: &str,
        resource: &str,
        query: &Query,
    ) -> Result<Fetched, FetchError> {
        if let Some(value) = self.bucket.get_json::<Value>(key) {
            tracing::debug!(key = %key, "serving document from cache");
            return Ok(Fetched {
                value,
                from_cache: true,
            });
        }

        let (flight, leader) = {
            let mut flights = self.flights.lock().unwrap();
            match flights.get(key) {
                Some(flight) => (Arc::clone(flight), false),
                None => {
                    let flight = Arc::new(Flight::new());
                    flights.insert(key.to_owned(), Arc::clone(&flight));
                    (flight, true)
                }
            }
        };

        if !leader {
            tracing::debug!(key = %key, "joining in-flight fetch");
            return flight.wait().map(|value| Fetched {
                value,
                from_cache: false,
            });
        }

        // A new attempt replaces any previously settled failure
        self.errors.lock().unwrap().remove(key);

        let result = self.fetch_with_retry(key, resource, query);
        match &result {
            Ok(value) => self.bucket.set_json(key, value),
            Err(e) => {
                self.errors.lock().unwrap().insert(key.to_owned(), e.clone());
            }
        }

        flight.settle(result.clone());
        self.flights.lock().unwrap().remove(key);

        result.map(|value| Fetched {
            value,
            from_cache: false,
        })
    }

    /// One fetch plus a single retry for transport failures.
    fn fetch_with_retry(
        &self,
        key: &str,
        resource: &str,
        query: &Query,
    ) -> Result<Value, FetchError> {
        match self.fetch_once(resource, query) {
            Err(e) if e.is_transient() => {
                tracing::debug!(key = %key, error = %e, "transient fetch failure, retrying once");
                self.fetch_once(resource, query)
            }
            other => other,
        }
    }

    fn fetch_once(&self, resource: &str, query: &Query) -> Result<Value, FetchError> {
        let envelope = self.source.fetch(resource, query)?;
        envelope
            .data
            .ok_or_else(|| FetchError::Decode("envelope contained no data".to_owned()))
    }

    /// What the service knows about a key, if anything.
    ///
    /// # Panics
    ///
    /// Panics if an internal lock is poisoned.
    #[must_use]
    pub fn state(&self, key: &str) -> Option<FetchState> {
        if self.flights.lock().unwrap().contains_key(key) {
            return Some(FetchState::Pending);
        }
        if let Some(error) = self.errors.lock().unwrap().get(key) {
            return Some(FetchState::Failed(error.clone()));
        }
        if self.bucket.get(key).is_some() {
            return Some(FetchState::Ready);
        }
        None
    }

    /// Clear every cached document and settled error state.
    ///
    /// In-flight fetches are left to settle; their results land in the
    /// emptied cache as usual.
    ///
    /// # Panics
    ///
    /// Panics if an internal lock is poisoned.
    pub fn purge(&self) {
        self.cache.purge();
        self.errors.lock().unwrap().clear();
        tracing::info!("content cache purged");
    }

    /// Fetch and decode a registered page.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when fetching or decoding fails.
    pub fn page(&self, def: &PageDefinition) -> Result<PageDocument, FetchError> {
        let fetched = self.document(def.name, def.resource, &def.query())?;
        decode(fetched.value)
    }

    /// Fetch and decode the site-wide settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when fetching or decoding fails.
    pub fn global(&self) -> Result<Global, FetchError> {
        let query = Query::new()
            .populate("nav")
            .populate("chat")
            .populate("default_seo");
        let fetched = self.document(GLOBAL_KEY, GLOBAL_RESOURCE, &query)?;
        decode(fetched.value)
    }

    /// Fetch the blog listing, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when fetching or decoding fails.
    pub fn articles(&self) -> Result<Vec<Article>, FetchError> {
        let query = Query::new()
            .populate("category")
            .sort("publishedAt:desc")
            .page_size(100);
        let fetched = self.document(ARTICLES_KEY, ARTICLES_RESOURCE, &query)?;
        decode(fetched.value)
    }

    /// Fetch every blog category.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when fetching or decoding fails.
    pub fn categories(&self) -> Result<Vec<Category>, FetchError> {
        let fetched = self.document(CATEGORIES_KEY, CATEGORIES_RESOURCE, &Query::new())?;
        decode(fetched.value)
    }

    /// Fetch one article by slug, `None` when the slug is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when fetching or decoding fails.
    pub fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, FetchError> {
        let key = format!("article:{slug}");
        let query = Query::new().populate("category").filter_eq("slug", slug);
        let fetched = self.document(&key, ARTICLES_RESOURCE, &query)?;
        let mut articles: Vec<Article> = decode(fetched.value)?;
        Ok(if articles.is_empty() {
            None
        } else {
            Some(articles.swap_remove(0))
        })
    }

    /// Submit a quote-form lead to the CMS.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the submission fails; nothing is
    /// retried, a visitor resubmits instead.
    pub fn submit_lead(&self, fields: &Value) -> Result<(), FetchError> {
        self.source.create(LEADS_RESOURCE, fields)?;
        tracing::info!("lead submitted");
        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}
