//! Redacting wrapper for consumer and token secrets.

// self
use crate::_prelude::*;

/// Consumer or token secret.
///
/// Formatting never prints the value. An empty secret (no token negotiated yet) renders as
/// `<empty>` so a client that has not finished the handshake is easy to spot in logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw secret, needed to build the signing key. Never log it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the secret is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	fn placeholder(&self) -> &'static str {
		if self.is_empty() { "<empty>" } else { "<redacted>" }
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret({})", self.placeholder())
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.placeholder())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::TokenPair;

	#[test]
	fn formatting_hides_value_but_shows_emptiness() {
		let secret = TokenSecret::from("plurk-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(<redacted>)");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "plurk-secret");
		assert_eq!(format!("{:?}", TokenSecret::default()), "TokenSecret(<empty>)");
	}

	#[test]
	fn persisted_token_pair_keeps_secret_in_clear() {
		let pair = TokenPair::new("access-token", "access-secret");
		let payload = serde_json::to_string(&pair).expect("Token pair should serialize.");

		assert_eq!(payload, r#"{"token":"access-token","secret":"access-secret"}"#);
		assert!(!format!("{pair:?}").contains("access-secret"));
	}
}
