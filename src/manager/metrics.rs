// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for token acquisition.
#[derive(Debug, Default)]
pub struct TokenMetrics {
	cache_hits: AtomicU64,
	renewals: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
}
impl TokenMetrics {
	/// Returns how many `get_token` calls were served from the cache.
	pub fn cache_hits(&self) -> u64 {
		self.cache_hits.load(Ordering::Relaxed)
	}

	/// Returns the number of token exchanges attempted.
	pub fn renewals(&self) -> u64 {
		self.renewals.load(Ordering::Relaxed)
	}

	/// Returns the number of token exchanges that produced a token.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of failed signing or exchange attempts.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_cache_hit(&self) {
		self.cache_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_renewal(&self) {
		self.renewals.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}
