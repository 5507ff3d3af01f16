//! The Plurk API client: credentials, the current token, and the signed request pipeline.

// crates.io
use http::{
	Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, TokenPair},
	config::Endpoints,
	error::ConfigError,
	http::{ApiResponse, HttpClient, HttpRequest},
	sign::{HmacSha1Signer, SignableRequest, Signer, SigningContext},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport and `HMAC-SHA1` signer.
pub type ReqwestPlurkClient = PlurkClient<ReqwestHttpClient, HmacSha1Signer>;

/// OAuth 1.0a client for the Plurk API.
///
/// Consumer credentials are fixed at construction. The token pair starts as whatever the
/// caller supplied (empty by default) and is replaced in place by
/// [`PlurkClient::complete_authorization`]. Every request is signed with the token held at
/// the time it is built.
#[derive(Clone)]
pub struct PlurkClient<C, S = HmacSha1Signer>
where
	C: ?Sized + HttpClient,
	S: ?Sized + Signer,
{
	/// Transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Signer producing the `Authorization` header.
	pub signer: Arc<S>,
	/// Handshake endpoints and API base.
	pub endpoints: Endpoints,
	credentials: ConsumerCredentials,
	token: TokenPair,
	verifier: Option<String>,
}
impl<C, S> PlurkClient<C, S>
where
	C: ?Sized + HttpClient,
	S: ?Sized + Signer,
{
	/// Creates a client from validated credentials and caller-provided collaborators.
	pub fn with_parts(
		credentials: ConsumerCredentials,
		endpoints: Endpoints,
		http_client: impl Into<Arc<C>>,
		signer: impl Into<Arc<S>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			signer: signer.into(),
			endpoints,
			credentials,
			token: TokenPair::default(),
			verifier: None,
		}
	}

	/// Sets or replaces the user token used to sign requests.
	pub fn with_token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
		self.token = TokenPair::new(token, token_secret);

		self
	}

	/// Application credentials.
	pub fn credentials(&self) -> &ConsumerCredentials {
		&self.credentials
	}

	/// Token pair currently used for signing.
	pub fn token(&self) -> &TokenPair {
		&self.token
	}

	/// Verifier held during an in-flight access-token exchange.
	pub fn verifier(&self) -> Option<&str> {
		self.verifier.as_deref()
	}

	pub(crate) fn set_token(&mut self, token: TokenPair) {
		self.token = token;
	}

	pub(crate) fn set_verifier(&mut self, verifier: Option<String>) {
		self.verifier = verifier;
	}

	/// Builds a signed request using the client's current token and verifier.
	pub(crate) fn signed_request(
		&self,
		method: Method,
		url: &Url,
		form: &[(String, String)],
	) -> Result<HttpRequest> {
		let context = SigningContext {
			credentials: &self.credentials,
			token: &self.token,
			verifier: self.verifier.as_deref(),
		};

		build_request(self.signer.as_ref(), method, url, form, &context)
	}

	/// Builds a request signed with consumer credentials only.
	pub(crate) fn consumer_signed_request(&self, method: Method, url: &Url) -> Result<HttpRequest> {
		let anonymous = TokenPair::default();
		let context =
			SigningContext { credentials: &self.credentials, token: &anonymous, verifier: None };

		build_request(self.signer.as_ref(), method, url, &[], &context)
	}

	pub(crate) async fn send(&self, request: HttpRequest) -> Result<ApiResponse> {
		<C as HttpClient>::execute(self.http_client.as_ref(), request).await
	}
}
#[cfg(feature = "reqwest")]
impl<S> PlurkClient<ReqwestHttpClient, S>
where
	S: Signer + Default,
{
	/// Creates a client for the production Plurk endpoints over the default reqwest transport.
	///
	/// Fails with [`ConfigError::MissingConsumerKey`] or [`ConfigError::MissingConsumerSecret`]
	/// when either value is empty. Use [`PlurkClient::with_token`] to attach a previously
	/// issued user token.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
		let credentials = ConsumerCredentials::new(consumer_key, consumer_secret)?;

		Ok(Self::with_parts(
			credentials,
			Endpoints::plurk()?,
			ReqwestHttpClient::default(),
			S::default(),
		))
	}
}
impl<C, S> Debug for PlurkClient<C, S>
where
	C: ?Sized + HttpClient,
	S: ?Sized + Signer,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PlurkClient")
			.field("endpoints", &self.endpoints)
			.field("credentials", &self.credentials)
			.field("token", &self.token)
			.field("verifier_set", &self.verifier.is_some())
			.finish()
	}
}

fn build_request<S>(
	signer: &S,
	method: Method,
	url: &Url,
	form: &[(String, String)],
	context: &SigningContext<'_>,
) -> Result<HttpRequest>
where
	S: ?Sized + Signer,
{
	let authorization =
		signer.authorization(&SignableRequest { method: &method, url, form }, context)?;
	let mut builder = http::Request::builder()
		.method(method.clone())
		.uri(url.as_str())
		.header(AUTHORIZATION, authorization);
	let body = if method == Method::POST {
		builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");

		url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(form.iter())
			.finish()
			.into_bytes()
	} else {
		Vec::new()
	};

	builder.body(body).map_err(|e| ConfigError::from(e).into())
}
