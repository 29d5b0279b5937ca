//! Single-retry policy for feed fetches.
//!
//! The feed is a best-effort public resource, so a failed attempt is retried
//! exactly once after a fixed delay. A second failure becomes
//! [`WwllnError::RecurringFetch`]. Only [`WwllnError::TransientFetch`] is
//! retried; anything else is returned as-is.

use std::future::Future;
use std::time::Duration;

use crate::error::WwllnError;

/// Where a logical fetch is in its retry budget. Owned by one call, so
/// concurrent fetches never observe each other's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryState {
    FirstAttempt,
    Retrying,
}

/// Runs `operation`, retrying once after `delay` if it fails transiently.
///
/// `operation` receives the current [`RetryState`] so it can tag its logs.
pub(crate) async fn retry_once<T, F, Fut>(delay: Duration, mut operation: F) -> Result<T, WwllnError>
where
    F: FnMut(RetryState) -> Fut,
    Fut: Future<Output = Result<T, WwllnError>>,
{
    let mut state = RetryState::FirstAttempt;
    loop {
        match (operation(state).await, state) {
            (Ok(value), _) => return Ok(value),
            (Err(WwllnError::TransientFetch { url, source }), RetryState::FirstAttempt) => {
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(
                    url = %url,
                    delay_ms,
                    error = %source,
                    "strike feed request failed, retrying once"
                );
                tokio::time::sleep(delay).await;
                state = RetryState::Retrying;
            }
            (Err(WwllnError::TransientFetch { url, source }), RetryState::Retrying) => {
                return Err(WwllnError::RecurringFetch { url, source });
            }
            (Err(err), _) => return Err(err),
        }
    }
}
