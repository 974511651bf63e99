use thiserror::Error;

use crate::query::QueryUrl;

/// Failures on the fetch path. Both variants end up as `FETCH_FAILURE`; the
/// split only exists for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("malformed search response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl FetchError {
    pub fn transport(url: &QueryUrl, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.as_str().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(url: &QueryUrl, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            url: url.as_str().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryUrlError {
    #[error("search term {0:?} contains '&' and could not be recovered from the query url")]
    AmbiguousTerm(String),
    #[error("invalid search endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("url {url:?} does not start with {prefix:?}")]
    ForeignPrefix { url: String, prefix: String },
    #[error("url {0:?} has no page parameter")]
    MissingPage(String),
    #[error("url {url:?} has a non-numeric page {value:?}")]
    InvalidPage { url: String, value: String },
}

/// An action that could not be decoded into a known reducer transition.
/// Indicates a wiring defect; callers must not recover from it.
#[derive(Debug, Error)]
#[error("invalid stories action: {0}")]
pub struct InvalidActionError(#[from] pub serde_json::Error);
