//! Client configuration: token endpoint and token lifetime knobs.

/// Builder API for assembling client configurations.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Token endpoint used when no override is configured.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/token";
/// Lifetime requested for each signed assertion.
pub const DEFAULT_ASSERTION_LIFETIME: Duration = Duration::seconds(3600);
/// Subtracted from the server-declared lifetime to absorb clock skew.
pub const DEFAULT_EXPIRY_MARGIN: Duration = Duration::seconds(10);

/// Immutable configuration consumed by the token manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Token endpoint; also the assertion's `aud` claim.
	pub token_endpoint: Url,
	/// `exp - iat` of each signed assertion.
	pub assertion_lifetime: Duration,
	/// Safety margin subtracted from `expires_in` when caching a token.
	pub expiry_margin: Duration,
}
impl ClientConfig {
	/// Creates a new builder seeded with the defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::new()
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			token_endpoint: default_token_endpoint(),
			assertion_lifetime: DEFAULT_ASSERTION_LIFETIME,
			expiry_margin: DEFAULT_EXPIRY_MARGIN,
		}
	}
}

fn default_token_endpoint() -> Url {
	Url::parse(DEFAULT_TOKEN_ENDPOINT).expect("Default token endpoint must be a valid URL.")
}
