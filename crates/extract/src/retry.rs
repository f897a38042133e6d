//! Bounded retry with exponential backoff for the collaborator call.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::receipt::{ExtractError, ExtractedReceipt, ReceiptExtractor};

/// Retry policy configuration: a fixed attempt budget with exponential
/// backoff between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget, first try included (1 = no retries).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Cap on the backoff growth.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after the first failure.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay before the retry that follows `attempt` (1-indexed):
    /// `base * 2^(attempt - 1)`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_ms = self.base_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt - 1).unwrap_or(u64::MAX);
        let delay_ms = base_ms.saturating_mul(factor).min(max_ms);

        Duration::from_millis(delay_ms)
    }
}

/// Call the extractor with bounded retries.
///
/// Provider failures back off exponentially; when the budget runs out the
/// caller gets a typed [`ExtractError::Exhausted`] carrying the attempt
/// count and last error. The result is all-or-nothing: no partial data
/// survives a failure.
pub fn extract_with_retry<X>(
    extractor: &X,
    image: &[u8],
    policy: &RetryPolicy,
) -> Result<ExtractedReceipt, ExtractError>
where
    X: ReceiptExtractor + ?Sized,
{
    let budget = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match extractor.extract(image) {
            Ok(receipt) => {
                debug!(attempt, items = receipt.items.len(), "receipt extraction succeeded");
                return Ok(receipt);
            }
            Err(err) if attempt < budget => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    attempt,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "receipt extraction failed, backing off"
                );
                thread::sleep(delay);
            }
            Err(err) => {
                warn!(attempt, error = %err, "receipt extraction exhausted its retry budget");
                return Err(ExtractError::Exhausted {
                    attempts: attempt,
                    last: err.to_string(),
                });
            }
        }
    }
}
