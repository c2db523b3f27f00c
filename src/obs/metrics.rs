// self
use crate::obs::{TelemetryDecision, TokenRequestOutcome};

/// Records a token request outcome via the global metrics recorder (when enabled).
pub fn record_token_request(outcome: TokenRequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oauth2_client_core_token_request_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a telemetry clear decision via the global metrics recorder (when enabled).
pub fn record_telemetry_decision(decision: TelemetryDecision) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oauth2_client_core_telemetry_total", "decision" => decision.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = decision;
	}
}
