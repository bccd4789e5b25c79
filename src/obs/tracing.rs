//! Spans wrapping client operations.
//!
//! Token exchanges leave the `status` field empty until the endpoint answers, so a span without
//! it marks a request that never got a response.

// self
use crate::{_prelude::*, obs::FlowKind};

/// Span around one client operation.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a span tagged with the flow kind and the public method (`stage`) that opened it.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_code_client.flow",
				flow = kind.as_str(),
				stage,
				status = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Records the token endpoint's HTTP status on the span.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("status", status);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = status;
		}
	}

	/// Enters the span for the rest of the current (blocking) call.
	pub fn entered(self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FlowSpanGuard {}
		}
	}

	/// Runs `f` inside the span and returns its output.
	pub fn in_scope<F, T>(&self, f: F) -> T
	where
		F: FnOnce() -> T,
	{
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn authorize_span_can_be_entered() {
		let _guard = FlowSpan::new(FlowKind::Authorize, "generate_authentication_uri").entered();
	}

	#[test]
	fn exchange_span_records_status_inside_its_scope() {
		let span = FlowSpan::new(FlowKind::AuthorizationCode, "fetch_access_token");
		let status = span.in_scope(|| {
			span.record_status(400);

			400
		});

		assert_eq!(status, 400);
	}
}
