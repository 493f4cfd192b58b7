//! Drives the service-account client against a local mock token endpoint and resource API,
//! showing token reuse and the POST retry loop.

// std
use std::time::Duration as StdDuration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_jwt_client::{
	auth::{ScopeSet, ServiceAccountKey},
	client::{RetryPolicy, ServiceAccountClient},
	config::ClientConfig,
	http::ReqwestHttpClient,
	reqwest::Client,
	url::Url,
};

const KEY_FILE: &str =
	concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/service-account.json");

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let items_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/items").header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"items\":[\"alpha\",\"beta\"]}");
		})
		.await;
	let jobs_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/jobs");
			then.status(201).header("content-type", "application/json").body("{\"id\":42}");
		})
		.await;
	let config =
		ClientConfig::builder().token_endpoint(Url::parse(&server.url("/token"))?).build()?;
	let http_client =
		ReqwestHttpClient::from_builder(Client::builder().timeout(StdDuration::from_secs(10)))?;
	let client = ServiceAccountClient::new(
		ServiceAccountKey::from_file(KEY_FILE)?,
		ScopeSet::new(["https://www.googleapis.com/auth/cloud-platform"])?,
	)
	.with_config(config)
	.with_http_client(http_client)
	.with_retry_policy(RetryPolicy::new(StdDuration::from_millis(250)));
	let items = client.get(&server.url("/v1/items")).await?;

	println!("Listed items: {items}.");

	let job =
		client.retry_post(&server.url("/v1/jobs"), &serde_json::json!({ "kind": "demo" }), 3).await?;

	println!("Created job: {job}.");

	token_mock.assert_async().await;
	items_mock.assert_async().await;
	jobs_mock.assert_async().await;

	Ok(())
}
