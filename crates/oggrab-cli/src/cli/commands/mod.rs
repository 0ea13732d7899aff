//! CLI command handlers.

mod links;
mod resolve;
mod run;

pub use links::run_links;
pub use resolve::run_resolve;
pub use run::run_pipeline;

use oggrab_core::config::OggrabConfig;
use oggrab_core::fetch::{CurlFetcher, RetryingFetcher};

/// Curl client with the configured headers and per-call-site retry policies.
fn build_fetcher(cfg: &OggrabConfig) -> RetryingFetcher<CurlFetcher> {
    RetryingFetcher::new(CurlFetcher::new(&cfg.http), cfg.retry.fetch_policies())
}
