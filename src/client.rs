//! Authenticated JSON client built on top of the [`TokenManager`].

pub mod request;
pub mod retry;

pub use retry::*;

// std
use std::path::Path;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeSet, ServiceAccountKey},
	config::ClientConfig,
	error::ConfigError,
	http::ReqwestHttpClient,
	manager::TokenManager,
};

/// Service-account client: one credential, one scope list, one cached token.
///
/// Calls that need a token go through the embedded [`TokenManager`]; see its
/// concurrency notes for the behavior of simultaneous renewals.
pub struct ServiceAccountClient {
	tokens: TokenManager,
	http_client: ReqwestHttpClient,
	retry_policy: RetryPolicy,
}
impl ServiceAccountClient {
	/// Loads the key file at `path` and requests `scopes` with default config and transport.
	///
	/// Credential and scope problems are fatal here rather than on first use.
	pub fn from_file<I, S>(path: impl AsRef<Path>, scopes: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let key = ServiceAccountKey::from_file(path)?;
		let scope = ScopeSet::new(scopes).map_err(ConfigError::from)?;

		Ok(Self::new(key, scope))
	}

	/// Creates a client with the default configuration and a fresh reqwest transport.
	pub fn new(key: ServiceAccountKey, scope: ScopeSet) -> Self {
		let http_client = ReqwestHttpClient::default();

		Self {
			tokens: TokenManager::new(key, scope, ClientConfig::default(), http_client.clone()),
			http_client,
			retry_policy: RetryPolicy::default(),
		}
	}

	/// Replaces the configuration. The token cache starts over empty.
	pub fn with_config(self, config: ClientConfig) -> Self {
		let Self { tokens, http_client, retry_policy } = self;
		let (key, scope, _) = tokens.into_parts();

		Self {
			tokens: TokenManager::new(key, scope, config, http_client.clone()),
			http_client,
			retry_policy,
		}
	}

	/// Reuses the caller-provided transport for both the token exchange and resource calls.
	///
	/// The token cache starts over empty.
	pub fn with_http_client(self, http_client: impl Into<ReqwestHttpClient>) -> Self {
		let Self { tokens, retry_policy, .. } = self;
		let (key, scope, config) = tokens.into_parts();
		let http_client = http_client.into();

		Self {
			tokens: TokenManager::new(key, scope, config, http_client.clone()),
			http_client,
			retry_policy,
		}
	}

	/// Replaces the backoff policy used by [`retry_post`](Self::retry_post).
	pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
		self.retry_policy = policy;

		self
	}

	/// Token manager backing this client.
	pub fn token_manager(&self) -> &TokenManager {
		&self.tokens
	}

	/// Active retry policy.
	pub fn retry_policy(&self) -> RetryPolicy {
		self.retry_policy
	}

	/// Returns a usable bearer token, renewing it when the cached one went stale.
	pub async fn get_token(&self) -> Result<AccessToken> {
		self.tokens.get_token().await
	}
}
impl Debug for ServiceAccountClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ServiceAccountClient")
			.field("tokens", &self.tokens)
			.field("retry_policy", &self.retry_policy)
			.finish()
	}
}
