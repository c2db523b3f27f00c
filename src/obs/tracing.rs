// self
use crate::{_prelude::*, obs::TelemetryDecision};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used around token endpoint calls.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided stage + endpoint.
	pub fn new(stage: &'static str, endpoint: &Url) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_client_core.request",
				stage,
				endpoint = endpoint.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, endpoint);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event after hosts were merged into a trust registry.
pub fn trace_trust_registration(added: usize, total: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(added, total, "Merged hosts into the trusted authority registry.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (added, total);
	}
}

/// Emits a debug event describing the telemetry clear decision for a response.
pub fn trace_telemetry_decision(status: u16, decision: TelemetryDecision) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(status, decision = decision.as_str(), "Evaluated telemetry clear policy.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, decision);
	}
}
