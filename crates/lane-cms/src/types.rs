//! CMS response contract.
//!
//! Every API response arrives as `{ "data": ..., "meta": ... }`. Exactly one
//! envelope level is decoded here; document payloads inside `data` stay raw
//! JSON for the caller to interpret. `data` is `null` when a single type has
//! no published entry.

use serde::Deserialize;

/// The `{ data, meta }` response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Document payload: an object for single types, an array for
    /// collections, `None` when nothing is published.
    pub data: Option<T>,
    /// Response metadata.
    #[serde(default)]
    pub meta: Meta,
}

/// Response metadata.
#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    /// Pagination details, present on collection responses.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination details of a collection response.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    /// Current page (1-based).
    pub page: u32,
    /// Entries per page.
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    /// Total number of pages.
    #[serde(rename = "pageCount")]
    pub page_count: u32,
    /// Total number of entries.
    pub total: u64,
}
