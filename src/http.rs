//! Transport primitives shared by the token exchange and resource calls.
//!
//! [`ReqwestHttpClient`] is the only place the crate touches `reqwest`: it executes a
//! prepared [`reqwest::Request`], buffers the body, and hands back an [`HttpResponse`]
//! snapshot so the token manager and the request executor can classify outcomes without
//! holding on to streaming handles.

// std
use std::ops::Deref;
// crates.io
use reqwest::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// `Content-Type` used for JSON request bodies.
pub const APPLICATION_JSON: &str = "application/json";
/// `Content-Type` used for the token exchange.
pub const APPLICATION_FORM: &str = "application/x-www-form-urlencoded";

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts, proxies, and TLS roots are whatever the wrapped client was built with; the
/// crate itself never cancels an in-flight request.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the transport from a configured [`reqwest::ClientBuilder`].
	///
	/// Use this to set timeouts or proxies; the crate applies none of its own.
	pub fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self> {
		let client = builder.build().map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}

	/// Executes `request` and buffers the full response body.
	pub(crate) async fn execute(&self, request: Request) -> Result<HttpResponse> {
		let endpoint = request.url().clone();
		let response = self
			.0
			.execute(request)
			.await
			.map_err(|e| TransportError::network(&endpoint, e))?;
		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(|e| TransportError::network(&endpoint, e))?;

		Ok(HttpResponse { status, body: body.to_vec() })
	}
}
impl From<ReqwestClient> for ReqwestHttpClient {
	fn from(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}

/// Buffered HTTP response.
#[derive(Clone, Debug)]
pub struct HttpResponse {
	/// Numeric status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Method, headers, and body for a resource call.
#[derive(Clone, Debug)]
pub struct RequestOptions {
	/// HTTP method.
	pub method: Method,
	/// Caller-supplied headers. `Authorization` and `Accept` are always overwritten.
	pub headers: HeaderMap,
	/// Encoded request body.
	pub body: Option<Vec<u8>>,
}
impl RequestOptions {
	/// Creates options for `method` with no headers and no body.
	pub fn new(method: Method) -> Self {
		Self { method, headers: HeaderMap::new(), body: None }
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// JSON-encodes `body` and sets `Content-Type: application/json`.
	pub fn with_json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		let bytes =
			serde_json::to_vec(body).map_err(|source| ConfigError::RequestBody { source })?;

		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
		self.body = Some(bytes);

		Ok(self)
	}

	/// Builds the outbound request with the bearer header attached.
	pub(crate) fn into_request(self, url: Url, bearer: &str) -> Result<Request> {
		let mut headers = self.headers;
		let auth = HeaderValue::from_str(bearer).map_err(ConfigError::from)?;

		headers.insert(AUTHORIZATION, auth);
		headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

		let mut request = Request::new(self.method, url);

		*request.headers_mut() = headers;

		if let Some(body) = self.body {
			*request.body_mut() = Some(body.into());
		}

		Ok(request)
	}
}
impl Default for RequestOptions {
	fn default() -> Self {
		Self::new(Method::GET)
	}
}

/// Builds the form-encoded token exchange request.
pub(crate) fn form_request(url: Url, body: String) -> Request {
	let mut request = Request::new(Method::POST, url);

	request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_FORM));
	request.headers_mut().insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
	*request.body_mut() = Some(body.into());

	request
}
