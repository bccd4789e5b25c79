#![cfg(feature = "reqwest")]

// std
use std::collections::HashMap;
// crates.io
use httpmock::prelude::*;
use parking_lot::Mutex;
// self
use oauth2_code_client::{
	_preludet::*,
	callback::{CallbackHandle, CallbackResult},
	token::TokenPayload,
};

type DeliveryLog = Arc<Mutex<Vec<(&'static str, TokenPayload)>>>;

fn recorder(log: &DeliveryLog, label: &'static str) -> CallbackHandle {
	let log = Arc::clone(log);

	Arc::new(move |payload: &TokenPayload| -> CallbackResult {
		log.lock().push((label, payload.clone()));

		Ok(())
	})
}

#[test]
fn authorization_uri_points_at_the_mock_server() {
	let server = MockServer::start();
	let client = build_reqwest_test_client(
		test_client_config(&server.base_url()).with_scope("openid profile").with_state("st-1"),
	);
	let uri = Url::parse(&client.generate_authentication_uri())
		.expect("Generated authorization URI should parse.");
	let pairs: HashMap<_, _> = uri.query_pairs().into_owned().collect();

	assert_eq!(uri.path(), "/authorize");
	assert_eq!(pairs.get("response_type"), Some(&"code".into()));
	assert_eq!(pairs.get("client_id"), Some(&"client-it".into()));
	assert_eq!(pairs.get("redirect_uri"), Some(&"https://app.example.com/callback".into()));
	assert_eq!(pairs.get("scope"), Some(&"openid profile".into()));
	assert_eq!(pairs.get("state"), Some(&"st-1".into()));
	assert!(uri.query().is_some_and(|query| query.contains("scope=openid%20profile")));
}

#[test]
fn code_exchange_notifies_callbacks_in_order_and_returns_the_payload() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST)
			.path("/token")
			.header("content-type", "application/x-www-form-urlencoded")
			.header("accept", "application/x-www-form-urlencoded");
		then.status(200).header("content-type", "application/json").body(
			"{\"access_token\":\"T\",\"token_type\":\"bearer\",\"expires_in\":3600,\"refresh_token\":\"R\"}",
		);
	});
	let mut client = build_reqwest_test_client(test_client_config(&server.base_url()));
	let log = Arc::new(Mutex::new(Vec::new()));

	client.add_callback(recorder(&log, "A"));
	client.add_callback(recorder(&log, "B"));

	let payload = client.fetch_access_token("XYZ").expect("Code exchange should succeed.");

	mock.assert();

	assert_eq!(payload.access_token(), Some("T"));
	assert_eq!(payload.token_type(), Some("bearer"));
	assert_eq!(payload.refresh_token(), Some("R"));
	assert_eq!(payload.get("expires_in"), Some("3600"));
	assert_eq!(payload.expires_in(), Some(Duration::seconds(3600)));

	let log = log.lock();

	assert_eq!(log.iter().map(|(label, _)| *label).collect::<Vec<_>>(), ["A", "B"]);
	assert!(log.iter().all(|(_, delivered)| *delivered == payload));
}

#[test]
fn invalid_grant_is_a_protocol_error_and_skips_callbacks() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST).path("/token");
		then.status(400)
			.header("content-type", "application/json")
			.body("{\"error\":\"invalid_grant\",\"error_description\":\"Code already used.\"}");
	});
	let mut client = build_reqwest_test_client(test_client_config(&server.base_url()));
	let log = Arc::new(Mutex::new(Vec::new()));

	client.add_callback(recorder(&log, "A"));

	let err = client.fetch_access_token("used-code").expect_err("HTTP 400 should fail.");

	mock.assert();

	match err {
		Error::TokenEndpoint { status, oauth_error, error_description } => {
			assert_eq!(status, 400);
			assert_eq!(oauth_error.as_deref(), Some("invalid_grant"));
			assert_eq!(error_description.as_deref(), Some("Code already used."));
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	assert!(log.lock().is_empty(), "No callback may run after a failed exchange.");
}

#[test]
fn non_json_success_body_is_a_parse_error() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST).path("/token");
		then.status(200)
			.header("content-type", "application/x-www-form-urlencoded")
			.body("access_token=T&token_type=bearer");
	});
	let client = build_reqwest_test_client(test_client_config(&server.base_url()));
	let err = client.fetch_access_token("XYZ").expect_err("Form-encoded body should fail.");

	mock.assert();

	assert!(matches!(err, Error::TokenResponseParse { status: 200, .. }));
}

#[test]
fn redirects_from_the_token_endpoint_are_not_followed() {
	let server = MockServer::start();
	let redirect = server.mock(|when, then| {
		when.method(POST).path("/token");
		then.status(302).header("location", "/elsewhere");
	});
	let elsewhere = server.mock(|when, then| {
		when.path("/elsewhere");
		then.status(200).body("{\"access_token\":\"T\"}");
	});
	let client = build_reqwest_test_client(test_client_config(&server.base_url()));
	let err = client.fetch_access_token("XYZ").expect_err("Redirect should surface as an error.");

	redirect.assert();
	elsewhere.assert_hits(0);

	assert!(matches!(err, Error::TokenEndpoint { status: 302, .. }));
}

#[test]
fn unreachable_token_endpoint_is_a_transport_error() {
	let client = build_reqwest_test_client(test_client_config("http://127.0.0.1:9"));
	let err = client.fetch_access_token("XYZ").expect_err("Closed port should fail.");

	assert!(matches!(err, Error::Transport(_)), "Unexpected error: {err:?}.");
}
