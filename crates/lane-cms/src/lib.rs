//! Headless CMS client for Lane.
//!
//! This crate talks to the CMS REST API and hides its wire format from the
//! rest of the workspace. It provides:
//!
//! - [`CmsClient`]: sync HTTP client with bearer auth and a global timeout
//! - [`Query`]: builder for the CMS's nested population query syntax
//! - [`Envelope`]: the `{ data, meta }` response contract
//! - [`ContentSource`]: trait over the client so consumers can be tested
//!   without a network ([`MockSource`] behind the `mock` feature flag)
//!
//! Every document travels as raw [`serde_json::Value`] at this layer;
//! callers decode into their own types. That keeps the trait object-safe
//! and keeps content modeling out of the transport crate.

mod client;
mod error;
#[cfg(feature = "mock")]
mod mock;
mod query;
mod types;

pub use client::{CmsClient, DEFAULT_TIMEOUT};
pub use error::CmsError;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use query::Query;
pub use types::{Envelope, Meta, Pagination};

/// A source of CMS documents.
///
/// Implemented by [`CmsClient`] for the real CMS and by [`MockSource`] in
/// tests. The resource is the API path segment after `/api/`, e.g.
/// `"home-page"` or `"articles"`.
pub trait ContentSource: Send + Sync {
    /// Fetch one resource with the given query.
    ///
    /// Returns the decoded response envelope. Collection resources carry a
    /// JSON array in `data`; single types carry an object.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError`] when the request fails at the transport level,
    /// the CMS answers with an error status, or the body is not the
    /// expected JSON shape.
    fn fetch(&self, resource: &str, query: &Query)
    -> Result<Envelope<serde_json::Value>, CmsError>;

    /// Create an entry in a collection resource.
    ///
    /// `fields` is the entry payload; the wire format wraps it as
    /// `{ "data": { ... } }` and that wrapping happens here, not in
    /// callers.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError`] under the same conditions as
    /// [`fetch`](Self::fetch).
    fn create(
        &self,
        resource: &str,
        fields: &serde_json::Value,
    ) -> Result<Envelope<serde_json::Value>, CmsError>;
}
