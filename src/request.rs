//! Request builders for authorization redirects and token exchanges.
//!
//! Both shapes consume a resolved [`ParameterSet`]. Authorization URIs expect values that were
//! already encoded by the resolver and append them verbatim; token requests expect raw values and
//! form-encode the whole body once.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::ConfigError, params::ParameterSet};

/// Media type used for both `Content-Type` and `Accept` on token requests.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Grants the token exchange engine can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization code exchange.
	AuthorizationCode,
	/// Refresh token renewal.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 `grant_type` identifier.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	/// Name of the parameter carrying the grant's credential (`code` or `refresh_token`).
	pub fn credential_param(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Appends pre-encoded `params` to `endpoint` as query parameters.
///
/// Values are written as-is, so they must already be encoded for URI use. The endpoint text is
/// kept exactly as configured (no trailing `/` is added to host-only endpoints). Existing query
/// parameters are kept and a fragment, if any, stays at the end.
pub fn build_authorization_uri(endpoint: &str, params: &ParameterSet) -> String {
	let (base, fragment) = match endpoint.split_once('#') {
		Some((base, fragment)) => (base, Some(fragment)),
		None => (endpoint, None),
	};
	let mut separator = match base.split_once('?') {
		None => Some('?'),
		Some((_, "")) => None,
		Some((_, query)) if query.ends_with('&') => None,
		Some(_) => Some('&'),
	};
	let mut uri = String::from(base);

	for (name, value) in params.pairs() {
		if let Some(separator) = separator {
			uri.push(separator);
		}

		separator = Some('&');

		uri.push_str(name);
		uri.push('=');
		uri.push_str(value);
	}

	if let Some(fragment) = fragment {
		uri.push('#');
		uri.push_str(fragment);
	}

	uri
}

/// Form-encoded POST aimed at the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
	/// Grant performed by the request.
	pub grant: GrantType,
	/// Token endpoint receiving the request.
	pub endpoint: Url,
	/// Unencoded body parameters.
	pub params: ParameterSet,
}
impl TokenRequest {
	/// Builds a request from resolved identity parameters plus the fixed grant parameters.
	///
	/// `grant_type` and the grant credential are always added, after the identity parameters,
	/// regardless of their values.
	pub fn new(
		grant: GrantType,
		endpoint: Url,
		identity_params: ParameterSet,
		credential: &str,
	) -> Self {
		let mut params = identity_params;

		params.insert("grant_type", grant.as_str());
		params.insert(grant.credential_param(), credential);

		Self { grant, endpoint, params }
	}

	/// Serializes the parameters as an `application/x-www-form-urlencoded` body.
	pub fn form_body(&self) -> String {
		form_urlencoded::Serializer::new(String::new()).extend_pairs(self.params.pairs()).finish()
	}

	/// Converts the request into the transport-level [`HttpRequest`].
	pub fn to_http_request(&self) -> Result<HttpRequest> {
		let request = Request::builder()
			.method(Method::POST)
			.uri(self.endpoint.as_str())
			.header(CONTENT_TYPE, FORM_URLENCODED)
			.header(ACCEPT, FORM_URLENCODED)
			.body(self.form_body().into_bytes())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	fn encoded_params() -> ParameterSet {
		let mut params = ParameterSet::new();

		params.append("response_type", "code");
		params.append("client_id", "abc");

		params
	}

	#[test]
	fn authorization_uri_appends_query() {
		assert_eq!(
			build_authorization_uri("https://auth/ep", &encoded_params()),
			"https://auth/ep?response_type=code&client_id=abc"
		);
	}

	#[test]
	fn authorization_uri_keeps_the_configured_endpoint_text() {
		assert_eq!(
			build_authorization_uri("https://auth.example.com", &encoded_params()),
			"https://auth.example.com?response_type=code&client_id=abc"
		);
		assert_eq!(
			build_authorization_uri("HTTPS://Auth.Example.com:443/ep", &encoded_params()),
			"HTTPS://Auth.Example.com:443/ep?response_type=code&client_id=abc"
		);
	}

	#[test]
	fn authorization_uri_keeps_existing_query_and_fragment() {
		assert_eq!(
			build_authorization_uri("https://auth/ep?tenant=t1#frag", &encoded_params()),
			"https://auth/ep?tenant=t1&response_type=code&client_id=abc#frag"
		);
		assert_eq!(
			build_authorization_uri("https://auth/ep?", &encoded_params()),
			"https://auth/ep?response_type=code&client_id=abc"
		);
		assert_eq!(
			build_authorization_uri("https://auth/ep?tenant=t1&", &encoded_params()),
			"https://auth/ep?tenant=t1&response_type=code&client_id=abc"
		);
	}

	#[test]
	fn authorization_uri_without_params_is_the_endpoint() {
		assert_eq!(
			build_authorization_uri("https://auth/ep", &ParameterSet::new()),
			"https://auth/ep"
		);
	}

	#[test]
	fn token_request_adds_fixed_parameters_last() {
		let mut identity_params = ParameterSet::new();

		identity_params.append("redirect_uri", "https://cb");
		identity_params.append("client_id", "abc");

		let request = TokenRequest::new(
			GrantType::AuthorizationCode,
			url("https://auth/token"),
			identity_params,
			"a code/with+chars",
		);

		assert_eq!(
			request.form_body(),
			"redirect_uri=https%3A%2F%2Fcb&client_id=abc&grant_type=authorization_code&code=a+code%2Fwith%2Bchars"
		);
	}

	#[test]
	fn token_request_sets_form_headers() {
		let request = TokenRequest::new(
			GrantType::RefreshToken,
			url("https://auth/token"),
			ParameterSet::new(),
			"rt",
		);
		let http_request = request.to_http_request().expect("Token request should convert.");

		assert_eq!(http_request.method(), Method::POST);
		assert_eq!(http_request.uri(), "https://auth/token");
		assert_eq!(http_request.headers()[CONTENT_TYPE], FORM_URLENCODED);
		assert_eq!(http_request.headers()[ACCEPT], FORM_URLENCODED);
		assert_eq!(http_request.body().as_slice(), b"grant_type=refresh_token&refresh_token=rt");
	}
}
