//! Decoding for the `key=value&key=value` bodies returned by the token endpoints.
//!
//! Values are kept verbatim. The token endpoints answer with bare tokens, so no
//! percent-decoding is applied; a token containing `%XX` sequences round-trips exactly as the
//! server sent it.

// self
use crate::{_prelude::*, auth::TokenPair, error::Error};

/// Response field carrying the token.
pub const OAUTH_TOKEN: &str = "oauth_token";
/// Response field carrying the token secret.
pub const OAUTH_TOKEN_SECRET: &str = "oauth_token_secret";

/// Decoded request-token or access-token response.
///
/// Holds every field the server returned, including extras such as
/// `oauth_callback_confirmed`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse(BTreeMap<String, String>);
impl TokenResponse {
	/// Looks up a raw field value.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// `oauth_token` field, if present.
	pub fn oauth_token(&self) -> Option<&str> {
		self.get(OAUTH_TOKEN)
	}

	/// `oauth_token_secret` field, if present.
	pub fn oauth_token_secret(&self) -> Option<&str> {
		self.get(OAUTH_TOKEN_SECRET)
	}

	/// Extracts the token pair, failing when either field is missing.
	pub fn token_pair(&self) -> Result<TokenPair> {
		let token =
			self.oauth_token().ok_or(Error::MissingResponseField { field: OAUTH_TOKEN })?;
		let secret = self
			.oauth_token_secret()
			.ok_or(Error::MissingResponseField { field: OAUTH_TOKEN_SECRET })?;

		Ok(TokenPair::new(token, secret))
	}

	/// Number of decoded fields.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether no fields were decoded.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the decoded fields in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Consumes the response, returning the underlying map.
	pub fn into_inner(self) -> BTreeMap<String, String> {
		self.0
	}
}
impl FromStr for TokenResponse {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(parse_token_response(s))
	}
}
impl From<TokenResponse> for BTreeMap<String, String> {
	fn from(value: TokenResponse) -> Self {
		value.0
	}
}

/// Splits `body` on `&`, then each segment on its first `=`.
///
/// Later duplicates overwrite earlier ones. Empty segments are skipped and a segment without
/// `=` maps to an empty value.
pub fn parse_token_response(body: &str) -> TokenResponse {
	let mut fields = BTreeMap::new();

	for segment in body.split('&').filter(|segment| !segment.is_empty()) {
		let (key, value) = segment.split_once('=').unwrap_or((segment, ""));

		fields.insert(key.to_owned(), value.to_owned());
	}

	TokenResponse(fields)
}
