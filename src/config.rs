//! Endpoint configuration for the OAuth handshake and the API base path.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default request-token endpoint.
pub const REQUEST_TOKEN_URL: &str = "https://www.plurk.com/OAuth/request_token";
/// Default desktop authorization page.
pub const AUTHORIZE_URL: &str = "https://www.plurk.com/OAuth/authorize";
/// Default mobile authorization page.
pub const AUTHORIZE_URL_FOR_MOBILE: &str = "https://www.plurk.com/m/authorize";
/// Default access-token endpoint.
pub const ACCESS_TOKEN_URL: &str = "https://www.plurk.com/OAuth/access_token";
/// Default base for `get`/`post` targets.
pub const API_BASE_URL: &str = "https://www.plurk.com/APP/";

/// Validated endpoint set consumed by the client.
///
/// Deserialization runs through [`EndpointsBuilder`], so omitted fields fall back to the Plurk
/// defaults and a loaded `api_base` is normalized like a built one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EndpointsBuilder")]
pub struct Endpoints {
	/// Request-token endpoint (first handshake leg).
	pub request_token: Url,
	/// Authorization page for desktop user agents.
	pub authorize: Url,
	/// Authorization page for mobile user agents.
	pub authorize_mobile: Url,
	/// Access-token endpoint (final handshake leg).
	pub access_token: Url,
	/// Base URL every API target is resolved against; always ends with `/`.
	pub api_base: Url,
}
impl Endpoints {
	/// Creates a builder seeded with the production Plurk endpoints.
	pub fn builder() -> EndpointsBuilder {
		EndpointsBuilder::default()
	}

	/// Production Plurk endpoints.
	pub fn plurk() -> Result<Self, ConfigError> {
		Self::builder().build()
	}

	/// Resolves an API target such as `Timeline/getPlurks` against [`Endpoints::api_base`].
	///
	/// The result must stay on the API base's origin and under its path, so absolute URLs and
	/// `..` segments cannot redirect a signed request elsewhere.
	pub fn api_url(&self, target: &str) -> Result<Url, ConfigError> {
		let url = self
			.api_base
			.join(target.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidTarget { target: target.to_owned(), source })?;

		if url.origin() != self.api_base.origin() || !url.path().starts_with(self.api_base.path())
		{
			return Err(ConfigError::TargetOutsideApiBase {
				target: target.to_owned(),
				resolved: url.into(),
			});
		}

		Ok(url)
	}
}

/// Builder for [`Endpoints`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EndpointsBuilder {
	/// Request-token endpoint.
	pub request_token: String,
	/// Desktop authorization page.
	pub authorize: String,
	/// Mobile authorization page.
	pub authorize_mobile: String,
	/// Access-token endpoint.
	pub access_token: String,
	/// API base.
	pub api_base: String,
}
impl EndpointsBuilder {
	/// Rebases every endpoint onto `origin` while keeping the Plurk paths.
	///
	/// Handy for staging hosts and local mock servers.
	pub fn origin(self, origin: &str) -> Self {
		let origin = origin.trim_end_matches('/');

		Self {
			request_token: format!("{origin}/OAuth/request_token"),
			authorize: format!("{origin}/OAuth/authorize"),
			authorize_mobile: format!("{origin}/m/authorize"),
			access_token: format!("{origin}/OAuth/access_token"),
			api_base: format!("{origin}/APP/"),
		}
	}

	/// Overrides the request-token endpoint.
	pub fn request_token(mut self, url: impl Into<String>) -> Self {
		self.request_token = url.into();

		self
	}

	/// Overrides the desktop authorization page.
	pub fn authorize(mut self, url: impl Into<String>) -> Self {
		self.authorize = url.into();

		self
	}

	/// Overrides the mobile authorization page.
	pub fn authorize_mobile(mut self, url: impl Into<String>) -> Self {
		self.authorize_mobile = url.into();

		self
	}

	/// Overrides the access-token endpoint.
	pub fn access_token(mut self, url: impl Into<String>) -> Self {
		self.access_token = url.into();

		self
	}

	/// Overrides the API base; a trailing `/` is appended when missing.
	pub fn api_base(mut self, url: impl Into<String>) -> Self {
		self.api_base = url.into();

		self
	}

	/// Parses and validates every endpoint.
	pub fn build(self) -> Result<Endpoints, ConfigError> {
		let mut api_base = self.api_base;

		if !api_base.ends_with('/') {
			api_base.push('/');
		}

		Ok(Endpoints {
			request_token: parse_endpoint("request_token", &self.request_token)?,
			authorize: parse_endpoint("authorize", &self.authorize)?,
			authorize_mobile: parse_endpoint("authorize_mobile", &self.authorize_mobile)?,
			access_token: parse_endpoint("access_token", &self.access_token)?,
			api_base: parse_endpoint("api_base", &api_base)?,
		})
	}
}
impl Default for EndpointsBuilder {
	fn default() -> Self {
		Self {
			request_token: REQUEST_TOKEN_URL.into(),
			authorize: AUTHORIZE_URL.into(),
			authorize_mobile: AUTHORIZE_URL_FOR_MOBILE.into(),
			access_token: ACCESS_TOKEN_URL.into(),
			api_base: API_BASE_URL.into(),
		}
	}
}

impl TryFrom<EndpointsBuilder> for Endpoints {
	type Error = ConfigError;

	fn try_from(builder: EndpointsBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

fn parse_endpoint(endpoint: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
