#![allow(dead_code)]

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
// self
use oauth2_jwt_client::{
	auth::{ScopeSet, ServiceAccountKey},
	client::{RetryPolicy, ServiceAccountClient},
	config::ClientConfig,
	url::Url,
};

pub const FIXTURE_KEY: &str =
	concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/service-account.json");
pub const FIXTURE_EMAIL: &str = "fixture@fixture-project.iam.gserviceaccount.com";
pub const CLOUD_PLATFORM: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const ACCESS_TOKEN: &str = "ya29.fixture-token";

pub fn fixture_key() -> ServiceAccountKey {
	ServiceAccountKey::from_file(FIXTURE_KEY).expect("Fixture credential should load.")
}

pub fn scope() -> ScopeSet {
	ScopeSet::new([CLOUD_PLATFORM]).expect("Fixture scope should be valid.")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
	ClientConfig::builder()
		.token_endpoint(
			Url::parse(&server.url("/token")).expect("Mock token endpoint should parse."),
		)
		.build()
		.expect("Loopback token endpoint should validate.")
}

pub fn build_client(server: &MockServer) -> ServiceAccountClient {
	build_client_with_key(server, fixture_key())
}

pub fn build_client_with_key(server: &MockServer, key: ServiceAccountKey) -> ServiceAccountClient {
	ServiceAccountClient::new(key, scope())
		.with_config(config_for(server))
		.with_retry_policy(RetryPolicy::new(StdDuration::from_millis(10)))
}

pub async fn mock_token<'a>(server: &'a MockServer, expires_in: u64) -> httpmock::Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.body_includes("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer")
				.body_includes("assertion=");
			then.status(200).header("content-type", "application/json").body(format!(
				"{{\"access_token\":\"{ACCESS_TOKEN}\",\"token_type\":\"Bearer\",\"expires_in\":{expires_in}}}"
			));
		})
		.await
}
