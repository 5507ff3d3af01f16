//! Client-level error types shared across the handshake, API calls, and session stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Invalid local configuration (credentials, endpoints, request construction).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, unexpected token endpoint status).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Session backend failure.
	#[error("{0}")]
	Session(
		#[from]
		#[source]
		crate::session::SessionError,
	),

	/// Callback `oauth_token` does not match the token saved when the handshake started.
	#[error("Callback oauth_token does not match the session token.")]
	TokenMismatch,
	/// Authorization callback omitted a required query parameter.
	#[error("Authorization callback is missing the `{name}` parameter.")]
	MissingCallbackParameter {
		/// Name of the missing query parameter.
		name: &'static str,
	},
	/// Token endpoint body omitted a required field.
	#[error("Token endpoint response is missing the `{field}` field.")]
	MissingResponseField {
		/// Name of the missing response field.
		field: &'static str,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Consumer key was empty.
	#[error("Consumer key cannot be empty.")]
	MissingConsumerKey,
	/// Consumer secret was empty.
	#[error("Consumer secret cannot be empty.")]
	MissingConsumerSecret,
	/// Endpoint set contains an invalid URL.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// API target cannot be resolved against the API base.
	#[error("API target `{target}` cannot be resolved against the API base.")]
	InvalidTarget {
		/// Target supplied by the caller.
		target: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// API target resolves to a URL outside the API base (other origin or `..` escape).
	#[error("API target `{target}` resolves to {resolved}, outside the API base.")]
	TargetOutsideApiBase {
		/// Target supplied by the caller.
		target: String,
		/// URL the target resolved to.
		resolved: String,
	},
	/// Consumer/token secrets could not key the HMAC.
	#[error("Signing key was rejected by the HMAC implementation.")]
	InvalidSigningKey,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, rejected token requests).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Target URL of the failed call.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint responded with HTTP {status}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Response body, lossily decoded.
		body: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		url: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { url: url.into(), source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		let url = e.url().map(|url| url.to_string()).unwrap_or_default();

		Self::network(url, e)
	}
}
