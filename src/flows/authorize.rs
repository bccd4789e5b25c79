//! Authorization URI generation for the front-channel leg of the grant.

// self
use crate::{
	flows::AuthCodeClient,
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	params::{self, ParameterSet},
	provider::ClientIdentity,
	request,
};

impl<I, C> AuthCodeClient<I, C>
where
	I: ClientIdentity,
	C: ?Sized + TokenHttpClient,
{
	/// Resolves the authorization parameters, encoded with the strategy's authorization encoding.
	pub fn authorization_params(&self) -> ParameterSet {
		params::resolve(
			&self.identity,
			&self.bindings.authorization,
			self.strategy.authorization_encoding(),
		)
	}

	/// Builds the URI the resource owner's user agent should be redirected to.
	///
	/// The result is the authorization endpoint followed by the resolved parameters in binding
	/// order; unset optional fields (`scope`, `state`, ...) are omitted. Identical configuration
	/// always produces the identical string.
	pub fn generate_authentication_uri(&self) -> String {
		const KIND: FlowKind = FlowKind::Authorize;

		let span = FlowSpan::new(KIND, "generate_authentication_uri");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let params = span.in_scope(|| self.authorization_params());
		let uri = request::build_authorization_uri(&self.authorization_base, &params);

		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		uri
	}
}
