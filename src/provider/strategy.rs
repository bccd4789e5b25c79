//! Provider strategy hooks that customize request building.
//!
//! Implementations pick how authorization URI values are encoded and decorate outgoing token
//! requests without tying flows to any particular HTTP client.

// self
use crate::{
	_prelude::*,
	params::{ParameterSet, ValueEncoding},
	request::GrantType,
};

/// Strategy hook that lets providers adjust encoding and token request parameters.
///
/// Both hooks have defaults suited to RFC-compliant providers, so most implementations override
/// nothing or a single method.
pub trait ProviderStrategy: Send + Sync {
	/// Encoding applied to authorization request values before they are appended to the URI.
	///
	/// Defaults to [`ValueEncoding::Rfc3986`]. Token request bodies are never affected; they are
	/// always resolved unencoded and form-encoded by the request builder.
	fn authorization_encoding(&self) -> ValueEncoding {
		ValueEncoding::Rfc3986
	}

	/// Gives providers a chance to add custom form parameters before dispatching.
	///
	/// Runs after the identity-backed parameters and the fixed grant parameters were added.
	/// Override it when a provider requires extra fields (audience, resource, etc.).
	fn augment_token_request(&self, _grant: GrantType, _params: &mut ParameterSet) {}
}

/// Default strategy for RFC 6749 compliant providers.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {}
