//! Read-only client identity consumed by every request the engine builds.

/// Capability set describing the OAuth client and the endpoints it talks to.
///
/// The engine only ever reads from an identity. Values are captured when a client is
/// constructed (endpoints) or pulled on every request (parameters), so implementations that
/// compute values lazily must keep them stable for the lifetime of the client.
///
/// Optional fields return `None` to have the matching parameter omitted from requests
/// entirely; they are never sent with an empty value.
pub trait ClientIdentity {
	/// `response_type` sent with authorization requests.
	fn response_type(&self) -> &str {
		"code"
	}

	/// OAuth 2.0 client identifier.
	fn client_id(&self) -> &str;

	/// Client secret for confidential clients; `None` when the client is public.
	fn client_secret(&self) -> Option<&str> {
		None
	}

	/// Redirect URI registered with the provider.
	fn redirect_uri(&self) -> &str;

	/// Requested scope, already joined with the provider's delimiter.
	fn scope(&self) -> Option<&str> {
		None
	}

	/// Opaque `state` value echoed back by the authorization server.
	fn state(&self) -> Option<&str> {
		None
	}

	/// Authorization endpoint the user agent is redirected to.
	fn authorization_endpoint(&self) -> &str;

	/// Token endpoint used for code exchanges and refreshes.
	fn token_endpoint(&self) -> &str;
}
