// std
use std::net::{Ipv4Addr, Ipv6Addr};
// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	config::{ClientConfig, DEFAULT_ASSERTION_LIFETIME, DEFAULT_EXPIRY_MARGIN},
};

/// Errors raised while constructing or validating configurations.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Token endpoint must use HTTPS unless it points at a loopback host.
	#[error("The token endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Assertion lifetime must be strictly positive.
	#[error("Assertion lifetime must be positive.")]
	NonPositiveAssertionLifetime,
	/// Expiry margin cannot be negative.
	#[error("Expiry margin cannot be negative.")]
	NegativeExpiryMargin,
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Token endpoint override.
	pub token_endpoint: Option<Url>,
	/// Assertion lifetime.
	pub assertion_lifetime: Duration,
	/// Expiry safety margin.
	pub expiry_margin: Duration,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the defaults.
	pub fn new() -> Self {
		Self {
			token_endpoint: None,
			assertion_lifetime: DEFAULT_ASSERTION_LIFETIME,
			expiry_margin: DEFAULT_EXPIRY_MARGIN,
		}
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the assertion lifetime.
	pub fn assertion_lifetime(mut self, lifetime: Duration) -> Self {
		self.assertion_lifetime = lifetime;

		self
	}

	/// Sets the expiry safety margin.
	pub fn expiry_margin(mut self, margin: Duration) -> Self {
		self.expiry_margin = margin;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let defaults = ClientConfig::default();
		let config = ClientConfig {
			token_endpoint: self.token_endpoint.unwrap_or(defaults.token_endpoint),
			assertion_lifetime: self.assertion_lifetime,
			expiry_margin: self.expiry_margin,
		};

		config.validate()?;

		Ok(config)
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ClientConfig {
	fn validate(&self) -> Result<(), ClientConfigError> {
		validate_endpoint(&self.token_endpoint)?;

		if !self.assertion_lifetime.is_positive() {
			return Err(ClientConfigError::NonPositiveAssertionLifetime);
		}
		if self.expiry_margin.is_negative() {
			return Err(ClientConfigError::NegativeExpiryMargin);
		}

		Ok(())
	}
}

fn validate_endpoint(url: &Url) -> Result<(), ClientConfigError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ClientConfigError::InsecureEndpoint { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(addr)) => addr == Ipv4Addr::LOCALHOST,
		Some(Host::Ipv6(addr)) => addr == Ipv6Addr::LOCALHOST,
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::DEFAULT_TOKEN_ENDPOINT;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn defaults_target_google_token_endpoint() {
		let config = ClientConfig::builder().build().expect("Defaults should validate.");

		assert_eq!(config.token_endpoint.as_str(), DEFAULT_TOKEN_ENDPOINT);
		assert_eq!(config.assertion_lifetime, Duration::hours(1));
		assert_eq!(config.expiry_margin, Duration::seconds(10));
		assert_eq!(config, ClientConfig::default());
	}

	#[test]
	fn rejects_plain_http_for_remote_hosts() {
		let err = ClientConfig::builder()
			.token_endpoint(url("http://example.com/token"))
			.build()
			.expect_err("Remote HTTP endpoints must be rejected.");

		assert!(matches!(err, ClientConfigError::InsecureEndpoint { .. }));
	}

	#[test]
	fn allows_plain_http_for_loopback_hosts() {
		for raw in ["http://127.0.0.1:8080/token", "http://localhost/token", "http://[::1]/token"] {
			ClientConfig::builder()
				.token_endpoint(url(raw))
				.build()
				.unwrap_or_else(|e| panic!("Loopback endpoint {raw} should validate: {e}."));
		}
	}

	#[test]
	fn rejects_degenerate_durations() {
		assert_eq!(
			ClientConfig::builder().assertion_lifetime(Duration::ZERO).build(),
			Err(ClientConfigError::NonPositiveAssertionLifetime)
		);
		assert_eq!(
			ClientConfig::builder().expiry_margin(Duration::seconds(-1)).build(),
			Err(ClientConfigError::NegativeExpiryMargin)
		);
		assert!(ClientConfig::builder().expiry_margin(Duration::ZERO).build().is_ok());
	}
}
