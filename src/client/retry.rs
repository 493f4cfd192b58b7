//! Bounded POST retry with linear backoff.
//!
//! Each call walks `Attempting → {Success | RetryScheduled → Attempting | Failed}`.
//! [`RetryPolicy::decide`] is the transition out of a failed attempt.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	client::ServiceAccountClient,
	obs::{self, Operation, OperationSpan, Outcome},
};

/// Delay unit multiplied by the attempt number.
pub const DEFAULT_RETRY_STEP: StdDuration = StdDuration::from_millis(500);
/// Attempt number from which scheduled retries are logged at `warn`.
pub const DEFAULT_WARN_AFTER: u32 = 3;

/// What to do after a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
	/// Sleep for the delay, then attempt again.
	Retry(StdDuration),
	/// Surface the error to the caller.
	Stop,
}

/// Linear backoff: the wait after attempt `n` is `n × step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Delay unit.
	pub step: StdDuration,
	/// Attempt number from which retries are logged at `warn`.
	pub warn_after: u32,
}
impl RetryPolicy {
	/// Creates a policy with the provided delay unit.
	pub fn new(step: StdDuration) -> Self {
		Self { step, warn_after: DEFAULT_WARN_AFTER }
	}

	/// Overrides the warn threshold.
	pub fn with_warn_after(mut self, attempt: u32) -> Self {
		self.warn_after = attempt;

		self
	}

	/// Wait scheduled after the 1-based `attempt` failed.
	pub fn delay_for(&self, attempt: u32) -> StdDuration {
		self.step.saturating_mul(attempt)
	}

	/// Whether the retry scheduled after the 1-based `attempt` is logged at `warn`.
	pub fn warns_at(&self, attempt: u32) -> bool {
		attempt >= self.warn_after
	}

	/// Decides whether attempt number `attempt` (1-based), which failed with `error`, is
	/// followed by another one. `max_attempts` of zero is treated as one.
	pub fn decide(&self, attempt: u32, error: &Error, max_attempts: u32) -> RetryDecision {
		if !error.is_retryable() || attempt >= max_attempts.max(1) {
			RetryDecision::Stop
		} else {
			RetryDecision::Retry(self.delay_for(attempt))
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(DEFAULT_RETRY_STEP)
	}
}

impl ServiceAccountClient {
	/// POSTs `body` to `url`, retrying failures up to `max_attempts` total attempts.
	///
	/// A 404 is never retried. The last error is returned once attempts run out.
	pub async fn retry_post<B>(&self, url: &str, body: &B, max_attempts: u32) -> Result<Value>
	where
		B: ?Sized + Serialize + Sync,
	{
		const OPERATION: Operation = Operation::RetryPost;

		let span = OperationSpan::new(OPERATION, "retry_post");

		obs::record_operation_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let mut attempt = 0;

				loop {
					attempt += 1;

					let error = match self.post(url, body).await {
						Ok(value) => return Ok(value),
						Err(e) => e,
					};

					match self.retry_policy.decide(attempt, &error, max_attempts) {
						RetryDecision::Stop => return Err(error),
						RetryDecision::Retry(delay) => {
							obs::retry_scheduled(
								attempt,
								max_attempts,
								self.retry_policy.warns_at(attempt),
								delay,
								&error,
							);
							tokio::time::sleep(delay).await;
						},
					}
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_operation_outcome(OPERATION, Outcome::Success),
			Err(_) => obs::record_operation_outcome(OPERATION, Outcome::Failure),
		}

		result
	}
}
