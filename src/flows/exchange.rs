//! Token exchanges: authorization code redemption and refresh token renewal.
//!
//! Both grants share one pipeline. Identity parameters are resolved unencoded, the grant
//! parameters are appended, the provider strategy may decorate the form, and the request is
//! sent through the configured [`TokenHttpClient`]. A 2xx response is parsed into a
//! [`TokenPayload`] and handed to every registered callback before it is returned; anything
//! else surfaces as [`Error::TokenEndpoint`] and no callback runs.

// self
use crate::{
	_prelude::*,
	flows::AuthCodeClient,
	http::{self, HttpResponse, TokenHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	params::{self, ValueEncoding},
	provider::ClientIdentity,
	request::{GrantType, TokenRequest},
	token::TokenPayload,
};

/// OAuth error members read from non-success token responses.
#[derive(Debug, Default, Deserialize)]
struct OAuthErrorBody {
	error: Option<String>,
	error_description: Option<String>,
}

impl<I, C> AuthCodeClient<I, C>
where
	I: ClientIdentity,
	C: ?Sized + TokenHttpClient,
{
	/// Redeems an authorization `code` for a token payload.
	///
	/// The request carries the token bindings (`redirect_uri`, `client_id`, and `client_secret`
	/// when set) plus `grant_type=authorization_code` and `code`. On success every registered
	/// callback receives the payload, in registration order, before it is returned.
	pub fn fetch_access_token(&self, code: &str) -> Result<TokenPayload> {
		self.exchange(GrantType::AuthorizationCode, code, "fetch_access_token")
	}

	/// Renews tokens with a `refresh_token` previously issued by the provider.
	///
	/// Mirrors [`AuthCodeClient::fetch_access_token`], using the refresh bindings and
	/// `grant_type=refresh_token`.
	pub fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenPayload> {
		self.exchange(GrantType::RefreshToken, refresh_token, "refresh_access_token")
	}

	/// Builds the token request for `grant` without sending it.
	pub fn token_request(&self, grant: GrantType, credential: &str) -> TokenRequest {
		let bindings = match grant {
			GrantType::AuthorizationCode => &self.bindings.token,
			GrantType::RefreshToken => &self.bindings.refresh,
		};
		let identity_params = params::resolve(&self.identity, bindings, ValueEncoding::Unencoded);
		let mut request =
			TokenRequest::new(grant, self.token_endpoint.clone(), identity_params, credential);

		self.strategy.augment_token_request(grant, &mut request.params);

		request
	}

	fn exchange(
		&self,
		grant: GrantType,
		credential: &str,
		stage: &'static str,
	) -> Result<TokenPayload> {
		let kind = FlowKind::from(grant);
		let span = FlowSpan::new(kind, stage);

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let result = span.in_scope(|| self.exchange_inner(&span, grant, credential));

		match &result {
			Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
		}

		result
	}

	fn exchange_inner(
		&self,
		span: &FlowSpan,
		grant: GrantType,
		credential: &str,
	) -> Result<TokenPayload> {
		let request = self.token_request(grant, credential).to_http_request()?;
		let response = self.http_client.execute(request).map_err(http::map_transport_error)?;
		let status = response.status().as_u16();

		span.record_status(status);
		obs::record_token_response(FlowKind::from(grant), status);

		let payload = parse_token_response(&response)?;

		self.callbacks.notify_all(&payload)?;

		Ok(payload)
	}
}

/// Classifies a token endpoint response and parses successful bodies.
fn parse_token_response(response: &HttpResponse) -> Result<TokenPayload> {
	let status = response.status();

	if !status.is_success() {
		let body = serde_json::from_slice::<OAuthErrorBody>(response.body()).unwrap_or_default();

		return Err(Error::TokenEndpoint {
			status: status.as_u16(),
			oauth_error: body.error,
			error_description: body.error_description,
		});
	}

	TokenPayload::parse(response.body())
		.map_err(|source| Error::TokenResponseParse { source, status: status.as_u16() })
}
