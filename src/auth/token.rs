//! Cached bearer token model and its usability window.

pub mod secret;

// self
use crate::{_prelude::*, auth::token::secret::Secret};

/// Current lifecycle status for a cached token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Token can be attached to requests.
	Usable,
	/// Token reached its margin-adjusted expiry and must be renewed.
	Stale,
}

/// Bearer token issued by the token endpoint.
///
/// `expires_at` already has the clock-skew margin subtracted, so the token is usable only
/// while the current instant is strictly before it.
#[derive(Clone, Debug)]
pub struct AccessToken {
	/// Bearer string; callers must avoid logging it.
	pub secret: Secret,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Margin-adjusted expiry instant.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token that expires at `issued_at + expires_in - margin`.
	pub fn new(
		secret: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
		margin: Duration,
	) -> Self {
		Self { secret: Secret::new(secret), issued_at, expires_at: issued_at + expires_in - margin }
	}

	/// Returns the bearer string. Callers must avoid logging it.
	pub fn expose(&self) -> &str {
		self.secret.expose()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant < self.expires_at { TokenStatus::Usable } else { TokenStatus::Stale }
	}

	/// Returns `true` if the token may still be used at the provided instant.
	pub fn is_usable_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Usable)
	}

	/// Returns `true` if the token may still be used right now.
	pub fn is_usable(&self) -> bool {
		self.is_usable_at(OffsetDateTime::now_utc())
	}

	/// Time left before the token turns stale, clamped at zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}

	/// Formats the `Authorization` header value.
	pub(crate) fn bearer_header(&self) -> String {
		format!("Bearer {}", self.secret.expose())
	}
}
