//! Service-account key file loading.

// std
use std::{fs, path::Path};
// self
use crate::{_prelude::*, auth::Secret, error::CredentialError};

/// Service-account identity parsed from a JSON key file.
///
/// Only `client_email` and `private_key` are required; every other field the provider
/// writes into the key file is ignored except the optional identifiers below.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
	/// Issuer e-mail placed in the assertion's `iss` claim.
	pub client_email: String,
	/// PEM-encoded RSA private key used to sign assertions.
	pub private_key: Secret,
	/// Key identifier forwarded as the JWT `kid` header when present.
	#[serde(default)]
	pub private_key_id: Option<String>,
	/// Project the service account belongs to.
	#[serde(default)]
	pub project_id: Option<String>,
}
impl ServiceAccountKey {
	/// Creates a key from raw parts.
	pub fn new(client_email: impl Into<String>, private_key: impl Into<String>) -> Self {
		Self {
			client_email: client_email.into(),
			private_key: Secret::new(private_key),
			private_key_id: None,
			project_id: None,
		}
	}

	/// Sets the key identifier forwarded as the JWT `kid` header.
	pub fn with_private_key_id(mut self, id: impl Into<String>) -> Self {
		self.private_key_id = Some(id.into());

		self
	}

	/// Reads and parses a key file from disk.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
		let path = path.as_ref();
		let bytes = fs::read(path)
			.map_err(|source| CredentialError::Read { path: path.to_path_buf(), source })?;

		Self::parse(path, &bytes)
	}

	/// Parses a key document already held in memory.
	pub fn from_json(json: &str) -> Result<Self, CredentialError> {
		Self::parse(Path::new("<memory>"), json.as_bytes())
	}

	fn parse(path: &Path, bytes: &[u8]) -> Result<Self, CredentialError> {
		let mut de = serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| CredentialError::Parse { path: path.to_path_buf(), source })
	}
}
impl Debug for ServiceAccountKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ServiceAccountKey")
			.field("client_email", &self.client_email)
			.field("private_key", &"<redacted>")
			.field("private_key_id", &self.private_key_id)
			.field("project_id", &self.project_id)
			.finish()
	}
}
