//! Error types for single fetch attempts and for a whole retried fetch.

use thiserror::Error;

use super::policy::ErrorKind;

/// Failure of one HTTP attempt (curl failure, HTTP status, or local write failure).
/// Kept separate from [`FetchError`] so it can be classified before deciding on a retry.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The response status was outside 2xx at a call site that checks it.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the response body to disk failed (disk full, permission denied). Not retried.
    #[error("storage: {0}")]
    Storage(#[source] std::io::Error),
}

impl AttemptError {
    /// Network failures are worth another attempt; local storage failures are not.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AttemptError::Curl(_) | AttemptError::Http(_) => ErrorKind::Network,
            AttemptError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// A fetch that did not produce a usable response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt the policy allowed has failed.
    #[error("{url}: gave up after {attempts} attempt(s): {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: AttemptError,
    },
    /// A failure that is final on the first occurrence: a local storage error,
    /// or an error status on a page whose status is required to be 2xx.
    #[error("{url}: {source}")]
    Fatal {
        url: String,
        #[source]
        source: AttemptError,
    },
}

impl FetchError {
    /// The URL that was being fetched.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Exhausted { url, .. } | FetchError::Fatal { url, .. } => url,
        }
    }
}
