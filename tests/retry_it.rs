mod common;

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use oauth2_jwt_client::{client::RetryPolicy, error::Error};

#[tokio::test]
async fn retry_post_recovers_after_two_failures() {
	let server = MockServer::start_async().await;
	let _token_mock = mock_token(&server, 3600).await;
	let failing = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/jobs");
			then.status(503).body("{\"error\":{\"message\":\"unavailable\"}}");
		})
		.await;
	// Attempt 3 runs 200ms after the second failure, leaving room to swap the mocks.
	let client =
		build_client(&server).with_retry_policy(RetryPolicy::new(StdDuration::from_millis(100)));
	let url = server.url("/v1/jobs");
	let body = json!({ "job": "demo" });
	let swap = async {
		while failing.calls_async().await < 2 {
			tokio::time::sleep(StdDuration::from_millis(5)).await;
		}

		let succeeding = server
			.mock_async(|when, then| {
				when.method(POST).path("/v1/jobs");
				then.status(200).header("content-type", "application/json").body("{\"id\":7}");
			})
			.await;

		assert_eq!(failing.calls_async().await, 2);

		failing.delete_async().await;

		succeeding
	};
	let (result, succeeding) = tokio::join!(client.retry_post(&url, &body, 3), swap);

	assert_eq!(result.expect("Third attempt should succeed."), json!({ "id": 7 }));

	succeeding.assert_calls_async(1).await;
}

#[tokio::test]
async fn retry_post_stops_on_not_found() {
	let server = MockServer::start_async().await;
	let _token_mock = mock_token(&server, 3600).await;
	let missing = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/missing");
			then.status(404).body("{\"error\":{\"message\":\"no such job\"}}");
		})
		.await;
	let client = build_client(&server);
	let err = client
		.retry_post(&server.url("/v1/missing"), &json!({}), 5)
		.await
		.expect_err("404 responses must not be retried.");

	assert!(matches!(&err, Error::Server { status: 404, message } if message == "no such job"));

	missing.assert_calls_async(1).await;
}

#[tokio::test]
async fn retry_post_returns_last_error_when_exhausted() {
	let server = MockServer::start_async().await;
	let _token_mock = mock_token(&server, 3600).await;
	let failing = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/jobs");
			then.status(500).body("overloaded");
		})
		.await;
	let client = build_client(&server);
	let err = client
		.retry_post(&server.url("/v1/jobs"), &json!({ "job": "demo" }), 3)
		.await
		.expect_err("Persistent failures must surface.");

	assert_eq!(err.status(), Some(500));
	assert_eq!(err.to_string(), "Server Error 500");

	failing.assert_calls_async(3).await;
}

#[tokio::test]
async fn retry_post_with_zero_attempts_runs_once() {
	let server = MockServer::start_async().await;
	let _token_mock = mock_token(&server, 3600).await;
	let failing = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/jobs");
			then.status(500);
		})
		.await;
	let client = build_client(&server);

	client
		.retry_post(&server.url("/v1/jobs"), &json!({}), 0)
		.await
		.expect_err("The single attempt fails.");

	failing.assert_calls_async(1).await;
}

#[tokio::test]
async fn retry_post_retries_token_failures() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(500).body("{\"error\":\"backend_error\"}");
		})
		.await;
	let resource = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/jobs");
			then.status(200).body("{}");
		})
		.await;
	let client = build_client(&server);
	let err = client
		.retry_post(&server.url("/v1/jobs"), &json!({}), 2)
		.await
		.expect_err("Token failures must surface once attempts run out.");

	assert_eq!(err.status(), Some(500));

	token_mock.assert_calls_async(2).await;
	resource.assert_calls_async(0).await;
}
