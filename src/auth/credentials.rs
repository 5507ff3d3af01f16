//! Consumer credentials and user token pairs used to sign requests.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Application credentials issued by Plurk, fixed for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
	key: String,
	secret: TokenSecret,
}
impl ConsumerCredentials {
	/// Validates and wraps a consumer key/secret pair.
	///
	/// Both values must be non-empty.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
		let key = key.into();
		let secret = secret.into();

		if key.is_empty() {
			return Err(ConfigError::MissingConsumerKey);
		}
		if secret.is_empty() {
			return Err(ConfigError::MissingConsumerSecret);
		}

		Ok(Self { key, secret: TokenSecret::new(secret) })
	}

	/// Consumer key sent as `oauth_consumer_key`.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Consumer secret used in the signing key.
	pub fn secret(&self) -> &TokenSecret {
		&self.secret
	}
}
impl Debug for ConsumerCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConsumerCredentials")
			.field("key", &self.key)
			.field("secret", &self.secret)
			.finish()
	}
}

/// User token and token secret; both empty until a token is supplied or negotiated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Token sent as `oauth_token`.
	pub token: String,
	/// Secret combined with the consumer secret to form the signing key.
	pub secret: TokenSecret,
}
impl TokenPair {
	/// Creates a pair from raw strings.
	pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { token: token.into(), secret: TokenSecret::new(secret) }
	}

	/// Whether no token has been supplied yet.
	pub fn is_empty(&self) -> bool {
		self.token.is_empty()
	}
}
