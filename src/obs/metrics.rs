// self
use crate::obs::{FlowKind, FlowOutcome};

/// Bumps `plurk_oauth_flow_total{flow,outcome}` on the global recorder.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"plurk_oauth_flow_total",
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

/// Bumps `plurk_oauth_flow_failures_total{flow,error}` with a [`super::failure_class`] label.
pub fn record_flow_failure(kind: FlowKind, class: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("plurk_oauth_flow_failures_total", "flow" => kind.as_str(), "error" => class)
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, class);
	}
}
