//! Server telemetry collaborator contract and the coordinator facade used by the client.
//!
//! The header encoding and the failure cache live in the collaborator. The coordinator only
//! asks for header values and decides, from an observed HTTP status, whether the cached
//! failure history can be dropped.

// self
use crate::{
	_prelude::*,
	obs::{self, TelemetryDecision},
};

/// External server telemetry manager.
pub trait ServerTelemetryManager
where
	Self: Send + Sync,
{
	/// Encodes the telemetry signal for the request being sent.
	fn generate_current_request_header_value(&self) -> String;

	/// Encodes the telemetry signal of previously failed requests.
	fn generate_last_request_header_value(&self) -> String;

	/// Drops the cached failure history.
	fn clear_telemetry_cache(&self);
}

/// Thin facade over a configured [`ServerTelemetryManager`].
#[derive(Clone)]
pub struct TelemetryCoordinator(Arc<dyn ServerTelemetryManager>);
impl TelemetryCoordinator {
	/// Wraps a telemetry manager.
	pub fn new(manager: Arc<dyn ServerTelemetryManager>) -> Self {
		Self(manager)
	}

	/// Header value describing the current request.
	pub fn current_request_header_value(&self) -> String {
		self.0.generate_current_request_header_value()
	}

	/// Header value describing previously failed requests.
	pub fn last_request_header_value(&self) -> String {
		self.0.generate_last_request_header_value()
	}

	/// Applies the clear policy to an observed status and reports the decision.
	pub fn on_response_status(&self, status: u16) -> TelemetryDecision {
		let decision = if server_recorded_telemetry(status) {
			self.0.clear_telemetry_cache();

			TelemetryDecision::Cleared
		} else {
			TelemetryDecision::Retained
		};

		obs::trace_telemetry_decision(status, decision);
		obs::record_telemetry_decision(decision);

		decision
	}
}
impl Debug for TelemetryCoordinator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TelemetryCoordinator(..)")
	}
}
impl From<Arc<dyn ServerTelemetryManager>> for TelemetryCoordinator {
	fn from(manager: Arc<dyn ServerTelemetryManager>) -> Self {
		Self::new(manager)
	}
}

/// Whether a response status proves the server logged the telemetry headers.
///
/// Statuses of 500 and above, and 429, mean the signal may have been dropped and must be
/// resent on the next request.
pub fn server_recorded_telemetry(status: u16) -> bool {
	status < 500 && status != 429
}
