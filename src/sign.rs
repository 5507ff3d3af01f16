//! OAuth 1.0a request signing.
//!
//! [`Signer`] turns a request description plus the client's credentials into an
//! `Authorization` header value. [`HmacSha1Signer`] implements RFC 5849 `HMAC-SHA1`, which is
//! the only method Plurk accepts.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use http::Method;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, TokenPair},
	error::ConfigError,
};

const NONCE_LEN: usize = 32;
// RFC 3986 unreserved characters stay literal.
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Signing inputs owned by the client at the time a request is built.
#[derive(Clone, Copy, Debug)]
pub struct SigningContext<'a> {
	/// Application credentials.
	pub credentials: &'a ConsumerCredentials,
	/// Current user token; omitted from the header while empty.
	pub token: &'a TokenPair,
	/// Verifier, present only during the access-token exchange.
	pub verifier: Option<&'a str>,
}

/// Request fields covered by the signature.
#[derive(Clone, Copy, Debug)]
pub struct SignableRequest<'a> {
	/// HTTP method.
	pub method: &'a Method,
	/// Absolute request URL, query included.
	pub url: &'a Url,
	/// Form-encoded body parameters (empty for GET).
	pub form: &'a [(String, String)],
}

/// Produces `Authorization` header values for outbound requests.
pub trait Signer
where
	Self: 'static + Send + Sync,
{
	/// Signs `request` with `context`, returning the full header value (`OAuth ...`).
	fn authorization(
		&self,
		request: &SignableRequest<'_>,
		context: &SigningContext<'_>,
	) -> Result<String>;
}

/// RFC 5849 `HMAC-SHA1` signer with a fresh nonce and timestamp per request.
#[derive(Clone, Copy, Debug, Default)]
pub struct HmacSha1Signer;
impl HmacSha1Signer {
	/// Signs with a caller-supplied nonce and timestamp.
	pub fn authorization_with(
		&self,
		request: &SignableRequest<'_>,
		context: &SigningContext<'_>,
		nonce: &str,
		timestamp: i64,
	) -> Result<String> {
		let mut oauth_params = vec![
			("oauth_consumer_key", context.credentials.key().to_owned()),
			("oauth_nonce", nonce.to_owned()),
			("oauth_signature_method", "HMAC-SHA1".to_owned()),
			("oauth_timestamp", timestamp.to_string()),
			("oauth_version", "1.0".to_owned()),
		];

		if !context.token.is_empty() {
			oauth_params.push(("oauth_token", context.token.token.clone()));
		}
		if let Some(verifier) = context.verifier {
			oauth_params.push(("oauth_verifier", verifier.to_owned()));
		}

		let base = signature_base_string(request, &oauth_params);
		let signing_key = format!(
			"{}&{}",
			encode(context.credentials.secret().expose()),
			encode(context.token.secret.expose())
		);
		let mut mac = <Hmac<Sha1>>::new_from_slice(signing_key.as_bytes())
			.map_err(|_| ConfigError::InvalidSigningKey)?;

		mac.update(base.as_bytes());

		let signature = STANDARD.encode(mac.finalize().into_bytes());

		oauth_params.push(("oauth_signature", signature));
		oauth_params.sort();

		let fields = oauth_params
			.iter()
			.map(|(key, value)| format!("{key}=\"{}\"", encode(value)))
			.collect::<Vec<_>>()
			.join(", ");

		Ok(format!("OAuth {fields}"))
	}
}
impl Signer for HmacSha1Signer {
	fn authorization(
		&self,
		request: &SignableRequest<'_>,
		context: &SigningContext<'_>,
	) -> Result<String> {
		let nonce = rand::rng()
			.sample_iter(Alphanumeric)
			.take(NONCE_LEN)
			.map(char::from)
			.collect::<String>();
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		self.authorization_with(request, context, &nonce, timestamp)
	}
}

/// Builds the RFC 5849 §3.4.1 signature base string.
pub(crate) fn signature_base_string(
	request: &SignableRequest<'_>,
	oauth_params: &[(&str, String)],
) -> String {
	let mut params = request
		.url
		.query_pairs()
		.map(|(key, value)| (encode(&key), encode(&value)))
		.chain(request.form.iter().map(|(key, value)| (encode(key), encode(value))))
		.chain(oauth_params.iter().map(|(key, value)| (encode(key), encode(value))))
		.collect::<Vec<_>>();

	params.sort();

	let normalized = params
		.iter()
		.map(|(key, value)| format!("{key}={value}"))
		.collect::<Vec<_>>()
		.join("&");
	let mut base_url = request.url.clone();

	base_url.set_query(None);
	base_url.set_fragment(None);

	format!(
		"{}&{}&{}",
		request.method.as_str().to_ascii_uppercase(),
		encode(base_url.as_str()),
		encode(&normalized)
	)
}

fn encode(value: &str) -> String {
	utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}
