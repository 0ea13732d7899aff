//! Retry and delay policy for HTTP fetches.
//!
//! Network failures are retried with a fixed or exponential delay; local
//! storage failures stop at once. The listing, subpage and download call
//! sites share one loop while each keeps its own attempt budget.

mod error;
mod policy;
mod run;

pub use error::{AttemptError, FetchError};
pub use policy::{Backoff, ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
