//! Optional observability for client flows.
//!
//! Every public network operation runs through [`observe`], which wraps the flow in a span and
//! records its outcome.
//!
//! # Feature Flags
//!
//! - `tracing`: spans named `plurk_oauth.flow` carrying `flow` and `stage`, plus a `warn` event
//!   with the failure class when a flow fails.
//! - `metrics`: the `plurk_oauth_flow_total{flow,outcome}` counter, and
//!   `plurk_oauth_flow_failures_total{flow,error}` for failures.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Client operations observed by the instrumentation hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Request-token leg plus authorization redirect.
	RequestToken,
	/// Callback validation plus access-token exchange.
	AccessToken,
	/// Signed `/APP/` call.
	Api,
}
impl FlowKind {
	/// Label used in span fields and metric labels.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::RequestToken => "request_token",
			FlowKind::AccessToken => "access_token",
			FlowKind::Api => "api",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each flow.
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
	/// Label used in metric labels.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}

/// Low-cardinality class of a flow failure.
///
/// Never carries response bodies, tokens, or URLs.
pub fn failure_class(error: &Error) -> &'static str {
	match error {
		Error::Config(ConfigError::InvalidTarget { .. } | ConfigError::TargetOutsideApiBase { .. }) =>
			"invalid_target",
		Error::Config(_) => "config",
		Error::Transport(TransportError::UnexpectedStatus { .. }) => "rejected",
		Error::Transport(_) => "transport",
		Error::Session(_) => "session",
		Error::TokenMismatch => "token_mismatch",
		Error::MissingCallbackParameter { .. } => "missing_callback_parameter",
		Error::MissingResponseField { .. } => "missing_response_field",
	}
}

/// Runs `flow` inside a [`FlowSpan`], recording the attempt and its outcome.
pub async fn observe<T, F>(kind: FlowKind, stage: &'static str, flow: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(kind, stage);

	record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span.instrument(flow).await;

	match &result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success),
		Err(e) => {
			let class = failure_class(e);

			span.failed(class);
			record_flow_outcome(kind, FlowOutcome::Failure);
			record_flow_failure(kind, class);
		},
	}

	result
}
