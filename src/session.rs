//! Session binding between the authorization redirect and its callback.
//!
//! The handshake saves the request token pair when it redirects the user and reads it back
//! when Plurk calls the application again. [`SessionStore`] is the seam for whatever
//! per-visitor storage the host web framework provides; [`MemorySession`] is an in-process
//! implementation for tests, demos, and single-user tools.

pub mod callback;
pub mod memory;

pub use callback::CallbackParams;
pub use memory::MemorySession;

// self
use crate::_prelude::*;

/// Session key holding the request token.
pub const SESSION_OAUTH_TOKEN: &str = "oauth_token";
/// Session key holding the request token secret.
pub const SESSION_OAUTH_TOKEN_SECRET: &str = "oauth_token_secret";

/// Request-scoped key-value storage used by the handshake.
///
/// Writes follow last-write-wins semantics; no transactional guarantee is expected.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Reads the value stored under `key`.
	fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

	/// Stores or replaces the value under `key`.
	fn set(&self, key: &str, value: String) -> Result<(), SessionError>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SessionError {
	/// A value the handshake depends on is absent.
	#[error("Session has no value for `{key}`.")]
	MissingValue {
		/// Missing session key.
		key: &'static str,
	},
	/// Backend-level failure for the session engine.
	#[error("Session backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
