//! Authorization-code client orchestrating request building, token exchanges, and callbacks.

mod authorize;
mod exchange;

// self
use crate::{
	_prelude::*,
	callback::{CallbackHandle, CallbackRegistry, TokenCallback},
	error::ConfigError,
	http::TokenHttpClient,
	params::RequestBindings,
	provider::{ClientIdentity, DefaultProviderStrategy, ProviderStrategy},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestAuthCodeClient<I> = AuthCodeClient<I, ReqwestHttpClient>;

/// Drives the OAuth 2.0 authorization code grant for a single client identity.
///
/// The identity, endpoints, strategy, and parameter bindings are captured at construction and
/// never change afterwards. The only mutable state is the callback registry, which changes
/// solely through [`AuthCodeClient::add_callback`], [`AuthCodeClient::register_callback`], and
/// [`AuthCodeClient::remove_callback`]. Because those take `&mut self`, sharing one client
/// between threads that register callbacks requires external synchronization.
///
/// Every exchange is synchronous: [`AuthCodeClient::fetch_access_token`] and
/// [`AuthCodeClient::refresh_access_token`] block until the token endpoint answered and every
/// callback ran.
pub struct AuthCodeClient<I, C>
where
	I: ClientIdentity,
	C: ?Sized + TokenHttpClient,
{
	identity: I,
	http_client: Arc<C>,
	strategy: Arc<dyn ProviderStrategy>,
	bindings: RequestBindings<I>,
	// Configured text; generated URIs extend it verbatim.
	authorization_base: String,
	authorization_endpoint: Url,
	token_endpoint: Url,
	callbacks: CallbackRegistry,
}
impl<I, C> AuthCodeClient<I, C>
where
	I: ClientIdentity,
	C: ?Sized + TokenHttpClient,
{
	/// Creates a client that sends token requests through the caller-provided transport.
	///
	/// Fails with [`ConfigError`] when a required identity field is empty or an endpoint is not
	/// an absolute `http`/`https` URL with a host.
	pub fn with_http_client(identity: I, http_client: impl Into<Arc<C>>) -> Result<Self> {
		ensure_present("response_type", identity.response_type())?;
		ensure_present("client_id", identity.client_id())?;
		ensure_present("redirect_uri", identity.redirect_uri())?;

		let authorization_endpoint =
			parse_endpoint("authorization", identity.authorization_endpoint())?;
		let token_endpoint = parse_endpoint("token", identity.token_endpoint())?;
		let authorization_base = identity.authorization_endpoint().to_owned();

		Ok(Self {
			identity,
			http_client: http_client.into(),
			strategy: Arc::new(DefaultProviderStrategy),
			bindings: RequestBindings::standard(),
			authorization_base,
			authorization_endpoint,
			token_endpoint,
			callbacks: CallbackRegistry::new(),
		})
	}

	/// Replaces the provider strategy (defaults to [`DefaultProviderStrategy`]).
	pub fn with_strategy(mut self, strategy: Arc<dyn ProviderStrategy>) -> Self {
		self.strategy = strategy;

		self
	}

	/// Replaces the parameter bindings (defaults to [`RequestBindings::standard`]).
	pub fn with_bindings(mut self, bindings: RequestBindings<I>) -> Self {
		self.bindings = bindings;

		self
	}

	/// Identity the client was built from.
	pub fn identity(&self) -> &I {
		&self.identity
	}

	/// Validated authorization endpoint as normalized by [`Url`].
	///
	/// Generated authorization URIs extend the configured text instead, so a host-only endpoint
	/// such as `https://auth.example.com` is not given a trailing `/`.
	pub fn authorization_endpoint(&self) -> &Url {
		&self.authorization_endpoint
	}

	/// Validated token endpoint.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}

	/// Parameter bindings used for every request.
	pub fn bindings(&self) -> &RequestBindings<I> {
		&self.bindings
	}

	/// Registered callbacks.
	pub fn callbacks(&self) -> &CallbackRegistry {
		&self.callbacks
	}

	/// Appends a callback handle; the same handle may be added more than once.
	pub fn add_callback(&mut self, callback: CallbackHandle) {
		self.callbacks.add(callback);
	}

	/// Wraps `callback` in a handle, registers it, and returns the handle for later removal.
	pub fn register_callback(&mut self, callback: impl 'static + TokenCallback) -> CallbackHandle {
		self.callbacks.register(callback)
	}

	/// Removes the first registration of `callback`; returns `false` when it was not registered.
	pub fn remove_callback(&mut self, callback: &CallbackHandle) -> bool {
		self.callbacks.remove(callback)
	}
}
#[cfg(feature = "reqwest")]
impl<I> AuthCodeClient<I, ReqwestHttpClient>
where
	I: ClientIdentity,
{
	/// Creates a client backed by a fresh reqwest blocking transport with redirects disabled.
	pub fn new(identity: I) -> Result<Self> {
		Self::with_http_client(identity, ReqwestHttpClient::new()?)
	}
}
impl<I, C> Debug for AuthCodeClient<I, C>
where
	I: ClientIdentity,
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthCodeClient")
			.field("client_id", &self.identity.client_id())
			.field("client_secret_set", &self.identity.client_secret().is_some())
			.field("authorization_endpoint", &self.authorization_endpoint.as_str())
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("bindings", &self.bindings)
			.field("callbacks", &self.callbacks)
			.finish()
	}
}

fn ensure_present(field: &'static str, value: &str) -> Result<()> {
	if value.trim().is_empty() {
		Err(ConfigError::MissingField { field }.into())
	} else {
		Ok(())
	}
}

fn parse_endpoint(endpoint: &'static str, value: &str) -> Result<Url> {
	let invalid = |source: Option<url::ParseError>| ConfigError::InvalidEndpoint {
		endpoint,
		value: value.to_owned(),
		source,
	};
	let url = Url::parse(value).map_err(|e| invalid(Some(e)))?;

	// `localhost:8080/token` parses with `localhost` as its scheme.
	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() || !url.has_host() {
		return Err(invalid(None).into());
	}

	Ok(url)
}
