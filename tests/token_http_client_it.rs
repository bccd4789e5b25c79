// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use oauth2_code_client::{
	error::{Error, TransportError},
	flows::AuthCodeClient,
	http::{HttpClientError, HttpRequest, HttpResponse, TokenHttpClient},
	oauth2::http::{
		Method, StatusCode,
		header::{ACCEPT, CONTENT_TYPE},
	},
	params::{ParamBinding, RequestBindings},
	provider::ClientConfig,
	request::FORM_URLENCODED,
};

#[derive(Debug)]
enum FakeTransportError {
	Unreachable,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable => write!(f, "Token endpoint unreachable."),
		}
	}
}
impl StdError for FakeTransportError {}

enum Script {
	Respond(StatusCode, &'static str),
	Fail(fn() -> HttpClientError<FakeTransportError>),
}

/// Records every dispatched request and answers with a fixed script.
struct FakeHttpClient {
	script: Script,
	requests: Mutex<Vec<HttpRequest>>,
}
impl FakeHttpClient {
	fn ok(body: &'static str) -> Arc<Self> {
		Arc::new(Self { script: Script::Respond(StatusCode::OK, body), requests: Mutex::default() })
	}

	fn failing(err: fn() -> HttpClientError<FakeTransportError>) -> Arc<Self> {
		Arc::new(Self { script: Script::Fail(err), requests: Mutex::default() })
	}

	fn bodies(&self) -> Vec<String> {
		self.requests
			.lock()
			.iter()
			.map(|request| {
				String::from_utf8(request.body().clone()).expect("Form body should be UTF-8.")
			})
			.collect()
	}
}
impl TokenHttpClient for FakeHttpClient {
	type TransportError = FakeTransportError;

	fn execute(
		&self,
		request: HttpRequest,
	) -> Result<HttpResponse, HttpClientError<Self::TransportError>> {
		self.requests.lock().push(request);

		match &self.script {
			Script::Respond(status, body) => {
				let mut response = HttpResponse::new(body.as_bytes().to_vec());

				*response.status_mut() = *status;

				Ok(response)
			},
			Script::Fail(err) => Err(err()),
		}
	}
}

fn config() -> ClientConfig {
	ClientConfig::new(
		"client-it",
		"https://app.example.com/callback",
		"https://auth.example.com/authorize",
		"https://auth.example.com/token",
	)
}

fn client(
	config: ClientConfig,
	http_client: &Arc<FakeHttpClient>,
) -> AuthCodeClient<ClientConfig, FakeHttpClient> {
	AuthCodeClient::with_http_client(config, Arc::clone(http_client))
		.expect("Client with fake transport should build.")
}

#[test]
fn token_request_uses_form_post_with_matching_headers() {
	let http = FakeHttpClient::ok("{\"access_token\":\"T\"}");
	let client = client(config().with_client_secret("secret-it"), &http);

	client.fetch_access_token("XYZ").expect("Exchange should succeed.");

	let requests = http.requests.lock();
	let request = requests.first().expect("One request should be recorded.");

	assert_eq!(request.method(), Method::POST);
	assert_eq!(request.uri(), "https://auth.example.com/token");
	assert_eq!(request.headers()[CONTENT_TYPE], FORM_URLENCODED);
	assert_eq!(request.headers()[ACCEPT], FORM_URLENCODED);
	assert_eq!(
		request.body().as_slice(),
		b"redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&client_id=client-it&client_secret=secret-it&grant_type=authorization_code&code=XYZ"
	);
}

#[test]
fn public_clients_never_send_a_client_secret() {
	let http = FakeHttpClient::ok("{\"access_token\":\"T\"}");
	let client = client(config(), &http);

	client.fetch_access_token("XYZ").expect("Exchange should succeed.");
	client.refresh_access_token("R1").expect("Refresh should succeed.");

	assert!(http.bodies().iter().all(|body| !body.contains("client_secret")));
}

#[test]
fn consecutive_exchanges_share_no_request_state() {
	let http = FakeHttpClient::ok("{\"access_token\":\"T\"}");
	let client = client(config(), &http);

	client.fetch_access_token("code-1").expect("First exchange should succeed.");
	client.fetch_access_token("code-2").expect("Second exchange should succeed.");

	let bodies = http.bodies();

	assert_eq!(bodies.len(), 2);
	assert!(bodies[0].ends_with("&code=code-1"));
	assert!(bodies[1].ends_with("&code=code-2"));
	assert!(!bodies[1].contains("code-1"));
	assert_eq!(
		bodies[0].trim_end_matches("code-1"),
		bodies[1].trim_end_matches("code-2"),
		"Identity parameters must be identical across exchanges."
	);
}

#[test]
fn fixed_grant_parameters_win_over_colliding_bindings() {
	let http = FakeHttpClient::ok("{\"access_token\":\"T\"}");
	let bindings = RequestBindings {
		refresh: vec![
			ParamBinding::client_id(),
			ParamBinding::new("grant_type", |_: &ClientConfig| Some("password")),
		],
		..RequestBindings::standard()
	};
	let client = client(config(), &http).with_bindings(bindings);

	client.refresh_access_token("R1").expect("Refresh should succeed.");

	assert_eq!(http.bodies(), ["client_id=client-it&grant_type=refresh_token&refresh_token=R1"]);
}

#[test]
fn custom_bindings_extend_token_requests() {
	let http = FakeHttpClient::ok("{\"access_token\":\"T\"}");
	let mut bindings = RequestBindings::<ClientConfig>::standard();

	bindings.token.push(ParamBinding::scope());

	let client = client(config().with_scope("read write"), &http).with_bindings(bindings);

	client.fetch_access_token("XYZ").expect("Exchange should succeed.");

	assert!(http.bodies()[0].contains("&scope=read+write&"));
}

#[test]
fn transport_failures_map_into_transport_errors() {
	let http = FakeHttpClient::failing(|| {
		HttpClientError::Reqwest(Box::new(FakeTransportError::Unreachable))
	});
	let err = client(config(), &http)
		.fetch_access_token("XYZ")
		.expect_err("Transport failure should surface.");

	match err {
		Error::Transport(TransportError::Network { source }) =>
			assert_eq!(source.to_string(), "Token endpoint unreachable."),
		other => panic!("Unexpected error: {other:?}."),
	}

	let http = FakeHttpClient::failing(|| HttpClientError::Other("socket closed".into()));
	let err = client(config(), &http)
		.refresh_access_token("R1")
		.expect_err("Transport failure should surface.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::Other { ref message }) if message == "socket closed"
	));
}
