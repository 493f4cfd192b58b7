//! Signed JWT-bearer assertion presented to the token endpoint.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, ServiceAccountKey},
	error::AuthError,
};

/// OAuth 2.0 grant type for assertion exchanges.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Claims carried by the assertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
	/// Service-account e-mail.
	pub iss: String,
	/// Space-joined scopes; omitted when no scope was requested.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Token endpoint URL.
	pub aud: String,
	/// Issued-at, seconds since the Unix epoch.
	pub iat: i64,
	/// Expiry, seconds since the Unix epoch.
	pub exp: i64,
}
impl AssertionClaims {
	/// Builds the claims for `key` requesting `scope` from `audience`.
	pub fn new(
		key: &ServiceAccountKey,
		scope: &ScopeSet,
		audience: &Url,
		issued_at: OffsetDateTime,
		lifetime: Duration,
	) -> Self {
		let iat = issued_at.unix_timestamp();

		Self {
			iss: key.client_email.clone(),
			scope: (!scope.is_empty()).then(|| scope.joined()),
			aud: audience.to_string(),
			iat,
			exp: iat + lifetime.whole_seconds(),
		}
	}

	/// Signs the claims with the key's RSA private key (RS256).
	pub fn sign(&self, key: &ServiceAccountKey) -> Result<Assertion, AuthError> {
		let encoding_key = EncodingKey::from_rsa_pem(key.private_key.expose().as_bytes())
			.map_err(|source| AuthError::Signing { source })?;
		let mut header = Header::new(Algorithm::RS256);

		header.kid = key.private_key_id.clone();

		let jwt = jsonwebtoken::encode(&header, self, &encoding_key)
			.map_err(|source| AuthError::Signing { source })?;

		Ok(Assertion(jwt))
	}
}

/// Compact-serialized signed JWT.
#[derive(Clone, PartialEq, Eq)]
pub struct Assertion(String);
impl Assertion {
	/// Returns the compact JWT. Callers must avoid logging it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Form body for the JWT-bearer token request.
	pub fn form_body(&self) -> String {
		url::form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", JWT_BEARER_GRANT_TYPE)
			.append_pair("assertion", &self.0)
			.finish()
	}
}
impl Debug for Assertion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Assertion(<redacted>)")
	}
}
