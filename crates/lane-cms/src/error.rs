//! Error types for CMS access.

/// Error from CMS API operations.
///
/// The four variants are the complete failure taxonomy the rest of the
/// workspace distinguishes: transport failures, timeouts, error statuses
/// and undecodable bodies. Timeouts are split out of the transport errors
/// because they get their own retry and display treatment.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// Transport-level failure (DNS, connect, TLS, interrupted body).
    #[error("network error: {0}")]
    Network(#[source] ureq::Error),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The CMS answered with an error status.
    #[error("HTTP error: {status} {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// The response body was not the expected JSON document.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for CmsError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Timeout(_) => Self::Timeout,
            other => Self::Network(other),
        }
    }
}

/// Canonical reason phrase for an HTTP status code.
pub(crate) fn reason_phrase(status: u16) -> String {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_owned()
}
