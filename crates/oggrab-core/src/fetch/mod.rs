//! HTTP fetching with per-call-site retry policy.
//!
//! [`HttpFetch`] is a single attempt (one GET); [`RetryingFetcher`] wraps it
//! with the listing, subpage and download policies. The curl implementation
//! lives in [`curl_fetch`].

mod curl_fetch;

pub use curl_fetch::CurlFetcher;

use std::path::Path;

use crate::retry::{run_with_retry, AttemptError, FetchError, RetryPolicy};

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after redirects.
    pub url: String,
    /// HTTP status of the final response.
    pub status: u32,
    pub body: Vec<u8>,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One HTTP attempt. Implementations do not retry.
pub trait HttpFetch {
    /// GET `url` into memory. Does not check the status.
    fn get_page(&self, url: &str) -> Result<Page, AttemptError>;

    /// Stream the body of `url` into `dest` (created/truncated). Fails with
    /// `AttemptError::Http` on a non-2xx status. Returns bytes written.
    fn download_to(&self, url: &str, dest: &Path) -> Result<u64, AttemptError>;
}

impl<T: HttpFetch + ?Sized> HttpFetch for &T {
    fn get_page(&self, url: &str) -> Result<Page, AttemptError> {
        (**self).get_page(url)
    }

    fn download_to(&self, url: &str, dest: &Path) -> Result<u64, AttemptError> {
        (**self).download_to(url, dest)
    }
}

/// Retry policy and status checking for each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicies {
    /// Main listing page; single attempt by default.
    pub listing: RetryPolicy,
    /// File: subpages.
    pub page: RetryPolicy,
    /// Audio download.
    pub download: RetryPolicy,
    /// A non-2xx subpage response ends the fetch with [`FetchError::Fatal`]
    /// instead of being parsed. The listing page status is never checked.
    pub require_page_success: bool,
}

impl Default for FetchPolicies {
    fn default() -> Self {
        Self {
            listing: RetryPolicy::single_attempt(),
            page: RetryPolicy::default(),
            download: RetryPolicy::default(),
            require_page_success: true,
        }
    }
}

/// Wraps an [`HttpFetch`] with retries chosen by call site.
#[derive(Debug)]
pub struct RetryingFetcher<F> {
    inner: F,
    policies: FetchPolicies,
}

impl<F: HttpFetch> RetryingFetcher<F> {
    pub fn new(inner: F, policies: FetchPolicies) -> Self {
        Self { inner, policies }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn policies(&self) -> &FetchPolicies {
        &self.policies
    }

    /// Fetch the listing page with the listing policy. Any status is accepted.
    pub fn fetch_listing(&self, url: &str) -> Result<Page, FetchError> {
        run_with_retry(&self.policies.listing, url, || self.inner.get_page(url))
    }

    /// Fetch a File: subpage with the page policy.
    ///
    /// Only transport failures are retried. A response that arrives with a
    /// non-2xx status is final: it fails without retry when
    /// `require_page_success` is set, and is returned as-is otherwise.
    pub fn fetch_page(&self, url: &str) -> Result<Page, FetchError> {
        let page = run_with_retry(&self.policies.page, url, || self.inner.get_page(url))?;
        if self.policies.require_page_success && !page.is_success() {
            return Err(FetchError::Fatal {
                url: url.to_string(),
                source: AttemptError::Http(page.status),
            });
        }
        Ok(page)
    }

    /// Download `url` into `dest` with the download policy.
    pub fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        run_with_retry(&self.policies.download, url, || {
            self.inner.download_to(url, dest)
        })
    }
}
