//! Site domain services for Lane.
//!
//! This crate sits between the CMS transport ([`lane_cms`]) and the HTTP
//! server. It owns:
//!
//! - [`ContentService`]: cached, deduplicated document fetching with the
//!   per-key fetch state the pages observe
//! - [`pages`]: the static registry mapping URL paths to CMS resources
//!   and their hand-built population rules
//! - [`ChatWidget`]: the chat launcher's message state machine
//!
//! Everything here is synchronous; the server bridges into it with
//! blocking tasks.

mod chat;
mod error;
pub mod pages;
mod service;

pub use chat::{ChatMessage, ChatWidget, Sender};
pub use error::FetchError;
pub use pages::PageDefinition;
pub use service::{ContentService, FetchState, Fetched};
