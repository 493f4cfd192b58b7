// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_jwt_client.operation",
				operation = operation.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits the renewal event after a successful token exchange.
pub(crate) fn token_renewed(expires_at: OffsetDateTime) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(%expires_at, "renewed access token");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = expires_at;
	}
}

/// Emits the retry event at `warn` when `warn` is set, otherwise at `debug`.
pub(crate) fn retry_scheduled(
	attempt: u32,
	max_attempts: u32,
	warn: bool,
	delay: std::time::Duration,
	error: &Error,
) {
	#[cfg(feature = "tracing")]
	{
		let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);

		if warn {
			tracing::warn!(attempt, max_attempts, delay_ms, %error, "retrying.error.{attempt}");
		} else {
			tracing::debug!(attempt, max_attempts, delay_ms, %error, "retrying");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (attempt, max_attempts, warn, delay, error);
	}
}
