//! Counters for client operations and token endpoint responses.

// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_code_client_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the HTTP status a token endpoint answered with, bucketed by [`status_class`].
///
/// Transport failures never reach the endpoint and are only visible through
/// [`record_flow_outcome`].
pub fn record_token_response(kind: FlowKind, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_code_client_token_response_total",
			"flow" => kind.as_str(),
			"status_class" => status_class(status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, status);
	}
}

/// Buckets an HTTP status into a bounded label (`2xx`, `3xx`, `4xx`, `5xx`, or `other`).
pub const fn status_class(status: u16) -> &'static str {
	match status {
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}
