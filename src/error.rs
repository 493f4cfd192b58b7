//! Client-level error types shared by the token manager, request executor, and retry loop.

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, config::ClientConfigError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Service-account credential could not be loaded.
	#[error(transparent)]
	Credential(#[from] CredentialError),
	/// Token acquisition failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Resource endpoint answered with a status of 400 or above.
	#[error("{message}")]
	Server {
		/// HTTP status code returned by the resource endpoint.
		status: u16,
		/// `error.message` from a JSON error body, or `Server Error <status>`.
		message: String,
	},
	/// Resource endpoint answered successfully but the body is not JSON.
	#[error("Resource endpoint returned malformed JSON (status {status}).")]
	ResponseParse {
		/// HTTP status code returned by the resource endpoint.
		status: u16,
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
}
impl Error {
	/// Builds a [`Error::Server`] from a status code and an optional upstream message.
	pub fn server(status: u16, message: Option<String>) -> Self {
		let message = message.unwrap_or_else(|| format!("Server Error {status}"));

		Self::Server { status, message }
	}

	/// HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Server { status, .. } | Self::ResponseParse { status, .. } => Some(*status),
			Self::Auth(AuthError::TokenExchange { status, .. }) => Some(*status),
			Self::Auth(AuthError::TokenResponseParse { status, .. }) => Some(*status),
			_ => None,
		}
	}

	/// Whether the retry loop may attempt the call again.
	///
	/// Only a 404 is treated as permanent; every other failure is retried.
	pub fn is_retryable(&self) -> bool {
		self.status() != Some(404)
	}
}

/// Failures raised while loading the service-account credential file.
#[derive(Debug, ThisError)]
pub enum CredentialError {
	/// The credential file could not be read.
	#[error("Failed to read credential file {}.", .path.display())]
	Read {
		/// Path that was requested.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// The credential file is not a valid service-account document.
	#[error("Failed to parse credential file {}: {source}.", .path.display())]
	Parse {
		/// Path that was requested.
		path: PathBuf,
		/// Structured parsing failure pointing at the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Token acquisition failures. Never retried by the token manager itself.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The JWT assertion could not be signed with the credential's private key.
	#[error("Failed to sign the JWT-bearer assertion.")]
	Signing {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Token endpoint responded with a non-success status.
	#[error("Token endpoint returned status {status}: {message}.")]
	TokenExchange {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// OAuth error description or a generic summary.
		message: String,
	},
	/// Token endpoint responded with malformed JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code returned by the token endpoint.
		status: u16,
	},
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Client configuration failed validation.
	#[error(transparent)]
	InvalidConfig(#[from] ClientConfigError),
	/// Requested scopes are invalid.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// A request URL cannot be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// Raw URL supplied by the caller.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A header value contains characters HTTP does not allow.
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	/// A request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	RequestBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint that was being called.
		endpoint: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error raised while calling `endpoint`.
	pub fn network(
		endpoint: impl Display,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint: endpoint.to_string(), source: Box::new(src) }
	}
}
