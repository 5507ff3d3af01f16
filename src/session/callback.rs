//! Query parameters Plurk appends when it redirects the user back to the application.

// self
use crate::_prelude::*;

/// `oauth_token` + `oauth_verifier` pair received on the authorization callback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
	/// Request token echoed back by Plurk.
	pub oauth_token: Option<String>,
	/// One-time verifier proving the user approved the request.
	pub oauth_verifier: Option<String>,
}
impl CallbackParams {
	/// Builds callback parameters from known values.
	pub fn new(oauth_token: impl Into<String>, oauth_verifier: impl Into<String>) -> Self {
		Self { oauth_token: Some(oauth_token.into()), oauth_verifier: Some(oauth_verifier.into()) }
	}

	/// Parses a raw query string (with or without the leading `?`).
	///
	/// Values are form-decoded the way web frameworks decode inbound query strings; unrelated
	/// parameters are ignored and the last occurrence of a repeated key wins.
	pub fn from_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		let mut params = Self::default();

		for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
			match key.as_ref() {
				"oauth_token" => params.oauth_token = Some(value.into_owned()),
				"oauth_verifier" => params.oauth_verifier = Some(value.into_owned()),
				_ => {},
			}
		}

		params
	}

	/// Parses the query string of a full callback URL.
	pub fn from_url(url: &Url) -> Self {
		Self::from_query(url.query().unwrap_or_default())
	}
}
impl FromStr for CallbackParams {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from_query(s))
	}
}
