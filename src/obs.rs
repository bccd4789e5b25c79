//! Optional observability helpers for client flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_code_client.flow` with the `flow`
//!   (grant) and `stage` (call site) fields, plus `status` once a token endpoint answered.
//! - Enable `metrics` to increment the `oauth2_code_client_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`, and the
//!   `oauth2_code_client_token_response_total` counter labeled by `flow` + `status_class`.
//!
//! Neither records parameter values or token material.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, request::GrantType};

/// Flow kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization URI generation.
	Authorize,
	/// Authorization code exchange.
	AuthorizationCode,
	/// Refresh token renewal.
	Refresh,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::AuthorizationCode => "authorization_code",
			FlowKind::Refresh => "refresh",
		}
	}
}
impl From<GrantType> for FlowKind {
	fn from(grant: GrantType) -> Self {
		match grant {
			GrantType::AuthorizationCode => FlowKind::AuthorizationCode,
			GrantType::RefreshToken => FlowKind::Refresh,
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_labels_are_stable() {
		assert_eq!(FlowKind::Authorize.as_str(), "authorize");
		assert_eq!(FlowKind::AuthorizationCode.as_str(), "authorization_code");
		assert_eq!(FlowKind::Refresh.as_str(), "refresh");
		assert_eq!(FlowKind::Authorize.to_string(), "authorize");
		assert_eq!(FlowOutcome::Attempt.to_string(), "attempt");
		assert_eq!(FlowOutcome::Failure.as_str(), "failure");
	}

	#[test]
	fn grants_map_to_their_exchange_flow() {
		assert_eq!(FlowKind::from(GrantType::AuthorizationCode), FlowKind::AuthorizationCode);
		assert_eq!(FlowKind::from(GrantType::RefreshToken), FlowKind::Refresh);
	}
}
