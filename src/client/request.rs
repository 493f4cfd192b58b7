//! Authenticated request execution and response classification.

// crates.io
use reqwest::Method;
// self
use crate::{
	_prelude::*,
	client::ServiceAccountClient,
	error::ConfigError,
	http::{HttpResponse, RequestOptions},
	obs::{self, Operation, OperationSpan, Outcome},
};

impl ServiceAccountClient {
	/// Sends `options` to `url` with the current bearer token and returns the JSON body.
	///
	/// A status of 400 or above becomes [`Error::Server`]; an empty success body is
	/// returned as [`Value::Null`].
	pub async fn request(&self, url: &str, options: RequestOptions) -> Result<Value> {
		const OPERATION: Operation = Operation::Request;

		let span = OperationSpan::new(OPERATION, "request");

		obs::record_operation_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let url = parse_url(url)?;
				let token = self.tokens.get_token().await?;
				let request = options.into_request(url, &token.bearer_header())?;
				let response = self.http_client.execute(request).await?;

				classify_response(response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_operation_outcome(OPERATION, Outcome::Success),
			Err(_) => obs::record_operation_outcome(OPERATION, Outcome::Failure),
		}

		result
	}

	/// Issues a `GET`.
	pub async fn get(&self, url: &str) -> Result<Value> {
		self.request(url, RequestOptions::new(Method::GET)).await
	}

	/// Issues a `POST` with a JSON body.
	pub async fn post<B>(&self, url: &str, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize + Sync,
	{
		self.request(url, RequestOptions::new(Method::POST).with_json(body)?).await
	}

	/// Issues a `PUT` with a JSON body.
	pub async fn put<B>(&self, url: &str, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize + Sync,
	{
		self.request(url, RequestOptions::new(Method::PUT).with_json(body)?).await
	}

	/// Issues a `DELETE` with a JSON body.
	pub async fn del<B>(&self, url: &str, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize + Sync,
	{
		self.request(url, RequestOptions::new(Method::DELETE).with_json(body)?).await
	}
}

fn parse_url(raw: &str) -> Result<Url> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { url: raw.into(), source }.into())
}

fn classify_response(response: HttpResponse) -> Result<Value> {
	let status = response.status;

	if status >= 400 {
		return Err(Error::server(status, server_error_message(&response.body)));
	}
	if response.body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	serde_json::from_slice(&response.body).map_err(|source| Error::ResponseParse { status, source })
}

fn server_error_message(body: &[u8]) -> Option<String> {
	let value = serde_json::from_slice::<Value>(body).ok()?;

	value.pointer("/error/message")?.as_str().map(ToOwned::to_owned)
}
