//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`TokenHttpClient`] for your transport and pick its error type.
//! 2. Pass the transport to [`AuthCodeClient::with_http_client`].
//! 3. Transport failures come back as [`Error::Transport`]; HTTP error statuses come back as
//!    [`Error::TokenEndpoint`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
// self
use oauth2_code_client::{
	callback::CallbackResult,
	error::Error,
	flows::AuthCodeClient,
	http::{HttpClientError, HttpRequest, HttpResponse, TokenHttpClient},
	oauth2::http::StatusCode,
	provider::ClientConfig,
	token::TokenPayload,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::new(
		"demo-client",
		"https://app.example.com/oauth/callback",
		"https://provider.example.com/authorize",
		"https://provider.example.com/token",
	);
	let mut client: AuthCodeClient<_, MockHttpClient> =
		AuthCodeClient::with_http_client(config.clone(), MockHttpClient::Issue)?;

	client.register_callback(|payload: &TokenPayload| -> CallbackResult {
		println!("Callback observed token type {:?}.", payload.token_type());

		Ok(())
	});

	let payload = client.fetch_access_token("demo-code")?;

	println!("Mock transport issued a payload with {} member(s).", payload.len());

	let rejecting: AuthCodeClient<_, MockHttpClient> =
		AuthCodeClient::with_http_client(config.clone(), MockHttpClient::Reject)?;

	match rejecting.fetch_access_token("stale-code") {
		Err(Error::TokenEndpoint { status, oauth_error, .. }) =>
			println!("Provider rejected the code with HTTP {status} ({oauth_error:?})."),
		other => println!("Unexpected outcome: {other:?}."),
	}

	let offline: AuthCodeClient<_, MockHttpClient> =
		AuthCodeClient::with_http_client(config, MockHttpClient::Offline)?;

	match offline.fetch_access_token("demo-code") {
		Err(Error::Transport(err)) => println!("Transport failure surfaced as: {err}."),
		other => println!("Unexpected outcome: {other:?}."),
	}

	Ok(())
}

#[derive(Debug)]
enum MockTransportError {
	DnsFailure { host: &'static str },
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}."),
		}
	}
}
impl StdError for MockTransportError {}

enum MockHttpClient {
	Issue,
	Reject,
	Offline,
}
impl TokenHttpClient for MockHttpClient {
	type TransportError = MockTransportError;

	fn execute(
		&self,
		request: HttpRequest,
	) -> std::result::Result<HttpResponse, HttpClientError<Self::TransportError>> {
		println!("Mock transport received: {}.", String::from_utf8_lossy(request.body()));

		let (status, body) = match self {
			Self::Issue => (
				StatusCode::OK,
				r#"{"access_token":"mock-token","token_type":"bearer","expires_in":3600}"#,
			),
			Self::Reject => (StatusCode::BAD_REQUEST, r#"{"error":"invalid_grant"}"#),
			Self::Offline =>
				return Err(HttpClientError::Reqwest(Box::new(MockTransportError::DnsFailure {
					host: "provider.example.com",
				}))),
		};
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = status;

		Ok(response)
	}
}
