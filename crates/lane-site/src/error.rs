//! Fetch errors as the site layer sees them.

use lane_cms::CmsError;

/// A failed content fetch.
///
/// Mirrors [`CmsError`] but is `Clone` (and stores source detail as text)
/// so one settled failure can be shared by every caller waiting on the
/// same fetch and kept as the key's failed state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP error: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Only transport-level failures qualify; an error status or a decode
    /// failure would just repeat.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }
}

impl From<CmsError> for FetchError {
    fn from(e: CmsError) -> Self {
        match e {
            CmsError::Network(inner) => Self::Network(inner.to_string()),
            CmsError::Timeout => Self::Timeout,
            CmsError::Status { status, reason } => Self::Status { status, reason },
            CmsError::Decode(inner) => Self::Decode(inner.to_string()),
        }
    }
}
