//! Token manager: signs assertions, exchanges them, and caches the bearer token.
//!
//! [`TokenManager::get_token`] serves the cached token while it is usable and otherwise
//! performs one JWT-bearer exchange against the configured token endpoint. The cache is a
//! single slot replaced wholesale on every successful renewal.
//!
//! # Concurrency
//!
//! Renewal is not coordinated. Two tasks that observe a stale token at the same time will
//! both sign an assertion and both call the token endpoint; the last response to land wins
//! the slot. The slot's lock is only held to read or replace the token and never across an
//! `.await`, so the hazard is duplicate exchanges, never a deadlock or a torn token.

mod metrics;

pub use metrics::TokenMetrics;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AssertionClaims, ScopeSet, ServiceAccountKey},
	config::ClientConfig,
	error::AuthError,
	http::{self, HttpResponse, ReqwestHttpClient},
	obs::{self, Operation, OperationSpan, Outcome},
};

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	expires_in: u64,
}

#[derive(Deserialize)]
struct OAuthErrorBody {
	#[serde(default)]
	error: Option<String>,
	#[serde(default)]
	error_description: Option<String>,
}

/// Owns the credential and the single cached [`AccessToken`].
pub struct TokenManager {
	key: ServiceAccountKey,
	scope: ScopeSet,
	config: ClientConfig,
	http_client: ReqwestHttpClient,
	cached: RwLock<Option<AccessToken>>,
	metrics: Arc<TokenMetrics>,
}
impl TokenManager {
	/// Creates a manager with an empty cache.
	pub fn new(
		key: ServiceAccountKey,
		scope: ScopeSet,
		config: ClientConfig,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self {
			key,
			scope,
			config,
			http_client,
			cached: RwLock::new(None),
			metrics: Default::default(),
		}
	}

	/// Service-account credential used to sign assertions.
	pub fn key(&self) -> &ServiceAccountKey {
		&self.key
	}

	/// Scopes requested in every assertion.
	pub fn scope(&self) -> &ScopeSet {
		&self.scope
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Shared counters for cache hits and renewals.
	pub fn metrics(&self) -> &Arc<TokenMetrics> {
		&self.metrics
	}

	/// Snapshot of the cached token, usable or not.
	pub fn cached_token(&self) -> Option<AccessToken> {
		self.cached.read().clone()
	}

	/// Drops the cached token so the next [`get_token`](Self::get_token) renews.
	pub fn invalidate(&self) {
		self.cached.write().take();
	}

	/// Returns the cached token while usable, otherwise renews it.
	///
	/// Signing and exchange failures surface as [`AuthError`] and are not retried here.
	pub async fn get_token(&self) -> Result<AccessToken> {
		const OPERATION: Operation = Operation::TokenRenewal;

		if let Some(token) = self.usable_token(OffsetDateTime::now_utc()) {
			self.metrics.record_cache_hit();

			return Ok(token);
		}

		let span = OperationSpan::new(OPERATION, "get_token");

		obs::record_operation_outcome(OPERATION, Outcome::Attempt);
		self.metrics.record_renewal();

		let result = span.instrument(self.renew()).await;

		match &result {
			Ok(_) => {
				self.metrics.record_success();
				obs::record_operation_outcome(OPERATION, Outcome::Success);
			},
			Err(_) => {
				self.metrics.record_failure();
				obs::record_operation_outcome(OPERATION, Outcome::Failure);
			},
		}

		result
	}

	pub(crate) fn into_parts(self) -> (ServiceAccountKey, ScopeSet, ClientConfig) {
		(self.key, self.scope, self.config)
	}

	fn usable_token(&self, now: OffsetDateTime) -> Option<AccessToken> {
		self.cached.read().as_ref().filter(|token| token.is_usable_at(now)).cloned()
	}

	async fn renew(&self) -> Result<AccessToken> {
		let claims = AssertionClaims::new(
			&self.key,
			&self.scope,
			&self.config.token_endpoint,
			OffsetDateTime::now_utc(),
			self.config.assertion_lifetime,
		);
		let assertion = claims.sign(&self.key)?;
		let request =
			http::form_request(self.config.token_endpoint.clone(), assertion.form_body());
		let response = self.http_client.execute(request).await?;
		let token =
			parse_token_response(&response, OffsetDateTime::now_utc(), self.config.expiry_margin)?;

		*self.cached.write() = Some(token.clone());

		obs::token_renewed(token.expires_at);

		Ok(token)
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("client_email", &self.key.client_email)
			.field("scope", &self.scope)
			.field("token_endpoint", &self.config.token_endpoint.as_str())
			.field("token_cached", &self.cached.read().is_some())
			.finish()
	}
}

fn parse_token_response(
	response: &HttpResponse,
	now: OffsetDateTime,
	margin: Duration,
) -> Result<AccessToken, AuthError> {
	let status = response.status;

	if !response.is_success() {
		return Err(AuthError::TokenExchange { status, message: exchange_error_message(response) });
	}

	let mut de = serde_json::Deserializer::from_slice(&response.body);
	let body: TokenResponse = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| AuthError::TokenResponseParse { source, status })?;
	let expires_in = i64::try_from(body.expires_in)
		.ok()
		.map(Duration::seconds)
		.filter(|lifetime| now.checked_add(*lifetime).is_some())
		.ok_or(AuthError::ExpiresInOutOfRange)?;

	Ok(AccessToken::new(body.access_token, now, expires_in, margin))
}

fn exchange_error_message(response: &HttpResponse) -> String {
	let parsed = serde_json::from_slice::<OAuthErrorBody>(&response.body).ok();

	match parsed {
		Some(OAuthErrorBody { error_description: Some(description), .. }) => description,
		Some(OAuthErrorBody { error: Some(error), .. }) => error,
		_ => "unexpected response".into(),
	}
}
