//! Optional observability helpers for bootstrap and token endpoint calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_client_core.request` with the
//!   `stage` (call site) and `endpoint` fields, plus debug events for trust registration and
//!   telemetry decisions.
//! - Enable `metrics` to increment the `oauth2_client_core_token_request_total` counter for every
//!   attempt/success/failure (labeled by `outcome`) and the `oauth2_client_core_telemetry_total`
//!   counter for every telemetry clear decision (labeled by `decision`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each token endpoint call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenRequestOutcome {
	/// Entry to the token endpoint invoker.
	Attempt,
	/// A response with an HTTP status was received and decoded.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl TokenRequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenRequestOutcome::Attempt => "attempt",
			TokenRequestOutcome::Success => "success",
			TokenRequestOutcome::Failure => "failure",
		}
	}
}
impl Display for TokenRequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Result of evaluating the telemetry clear policy for one response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TelemetryDecision {
	/// The failure cache was cleared.
	Cleared,
	/// The failure cache was kept for retransmission.
	Retained,
	/// No telemetry coordinator is configured.
	Unconfigured,
}
impl TelemetryDecision {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TelemetryDecision::Cleared => "cleared",
			TelemetryDecision::Retained => "retained",
			TelemetryDecision::Unconfigured => "unconfigured",
		}
	}
}
impl Display for TelemetryDecision {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
