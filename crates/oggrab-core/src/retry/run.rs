//! Retry loop: run a closure until success or policy says stop.

use super::error::{AttemptError, FetchError};
use super::policy::{ErrorKind, RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or the retry policy says to stop.
/// On retryable failure, logs the attempt, sleeps for the delay, then tries again.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, url: &str, mut f: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, AttemptError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = e.kind();
                tracing::warn!("An error occurred fetching data: {}", e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry
                        if kind != ErrorKind::Storage && attempt >= policy.max_attempts =>
                    {
                        return Err(FetchError::Exhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            last: e,
                        });
                    }
                    RetryDecision::NoRetry => {
                        return Err(FetchError::Fatal {
                            url: url.to_string(),
                            source: e,
                        });
                    }
                    RetryDecision::RetryAfter(d) => {
                        let remaining = policy.max_attempts - attempt;
                        tracing::warn!(
                            ?kind,
                            "Retrying... ({} of {} attempts remaining)",
                            remaining,
                            policy.max_attempts
                        );
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
