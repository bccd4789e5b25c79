//! Serde-backed client configuration implementing [`ClientIdentity`].

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, provider::ClientIdentity};

const STATE_LEN: usize = 32;

/// Static client configuration, typically loaded from a config file or environment.
///
/// Every field maps one-to-one onto a [`ClientIdentity`] accessor. Optional fields that are
/// `None` (or missing from the serialized form) are omitted from outgoing requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// `response_type` for authorization requests (defaults to `code`).
	#[serde(default = "default_response_type")]
	pub response_type: String,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Optional client secret for confidential clients.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<String>,
	/// Registered redirect URI.
	pub redirect_uri: String,
	/// Optional scope string.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Optional `state` value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Authorization endpoint URI.
	pub authorization_endpoint: String,
	/// Token endpoint URI.
	pub token_endpoint: String,
}
impl ClientConfig {
	/// Creates a public-client configuration without secret, scope, or state.
	pub fn new(
		client_id: impl Into<String>,
		redirect_uri: impl Into<String>,
		authorization_endpoint: impl Into<String>,
		token_endpoint: impl Into<String>,
	) -> Self {
		Self {
			response_type: default_response_type(),
			client_id: client_id.into(),
			client_secret: None,
			redirect_uri: redirect_uri.into(),
			scope: None,
			state: None,
			authorization_endpoint: authorization_endpoint.into(),
			token_endpoint: token_endpoint.into(),
		}
	}

	/// Sets the client secret used for confidential clients.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the scope string.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Sets the `state` value.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Sets a freshly generated random `state` value.
	pub fn with_random_state(self) -> Self {
		self.with_state(generate_state())
	}

	/// Overrides the `response_type` (defaults to `code`).
	pub fn with_response_type(mut self, response_type: impl Into<String>) -> Self {
		self.response_type = response_type.into();

		self
	}
}
impl ClientIdentity for ClientConfig {
	fn response_type(&self) -> &str {
		&self.response_type
	}

	fn client_id(&self) -> &str {
		&self.client_id
	}

	fn client_secret(&self) -> Option<&str> {
		self.client_secret.as_deref()
	}

	fn redirect_uri(&self) -> &str {
		&self.redirect_uri
	}

	fn scope(&self) -> Option<&str> {
		self.scope.as_deref()
	}

	fn state(&self) -> Option<&str> {
		self.state.as_deref()
	}

	fn authorization_endpoint(&self) -> &str {
		&self.authorization_endpoint
	}

	fn token_endpoint(&self) -> &str {
		&self.token_endpoint
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("response_type", &self.response_type)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.field("scope", &self.scope)
			.field("state", &self.state)
			.field("authorization_endpoint", &self.authorization_endpoint)
			.field("token_endpoint", &self.token_endpoint)
			.finish()
	}
}

/// Generates a random alphanumeric `state` value suitable for CSRF protection.
pub fn generate_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

fn default_response_type() -> String {
	"code".into()
}
