//! Transport primitives for token exchanges.
//!
//! The module exposes [`TokenHttpClient`], the engine's only dependency on an HTTP stack. The
//! contract is synchronous: [`TokenHttpClient::execute`] blocks until the token endpoint has
//! answered (with any status) or the transport failed. Implementations backed by an async
//! client are free to block on their own runtime underneath.
//!
//! Requests and responses use the `oauth2` crate's [`HttpRequest`]/[`HttpResponse`] aliases so
//! custom transports can be written against plain `http` types.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
pub use oauth2::{HttpClientError, HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::{blocking::Client as BlockingClient, redirect::Policy};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Abstraction over HTTP transports capable of executing token exchanges.
///
/// Implementations must return `Ok` for every response that carries an HTTP status, including
/// 4xx/5xx; status classification belongs to the engine. `Err` is reserved for failures that
/// happened before a status was received.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and blocks until the response (or a transport failure) is available.
	fn execute(
		&self,
		request: HttpRequest,
	) -> Result<HttpResponse, HttpClientError<Self::TransportError>>;
}

/// Converts a transport failure into the crate's error taxonomy.
pub(crate) fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unknown transport failure".into() }.into(),
	}
}

/// Thin wrapper around reqwest's blocking client so shared HTTP behavior lives in one place.
///
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token endpoints
/// return results directly instead of delegating to another URI. [`ReqwestHttpClient::new`]
/// disables redirect following; configure any custom client passed to
/// [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub BlockingClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a blocking client with redirects disabled.
	pub fn new() -> Result<Self> {
		let client = BlockingClient::builder()
			.redirect(Policy::none())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest blocking client.
	pub fn with_client(client: BlockingClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<BlockingClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &BlockingClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = BlockingClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type TransportError = reqwest::Error;

	fn execute(
		&self,
		request: HttpRequest,
	) -> Result<HttpResponse, HttpClientError<Self::TransportError>> {
		let (parts, body) = request.into_parts();
		let response = self
			.0
			.request(parts.method, parts.uri.to_string())
			.headers(parts.headers)
			.body(body)
			.send()
			.map_err(Box::new)?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let mut response_new = HttpResponse::new(response.bytes().map_err(Box::new)?.to_vec());

		*response_new.status_mut() = status;
		*response_new.headers_mut() = headers;

		Ok(response_new)
	}
}
