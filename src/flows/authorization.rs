//! Three-legged OAuth 1.0a handshake.
//!
//! [`PlurkClient::start_authorization`] fetches a request token, saves it in the caller's
//! session, and returns the redirect that sends the user to Plurk.
//! [`PlurkClient::complete_authorization`] runs when Plurk redirects back: it checks the
//! echoed token against the session, exchanges the verifier for an access token, and
//! switches the client over to that token.

// crates.io
use http::{Method, StatusCode, header::LOCATION};
// self
use crate::{
	_prelude::*,
	auth::{TokenPair, TokenResponse, parse_token_response},
	client::PlurkClient,
	error::{ConfigError, TransportError},
	flows::is_mobile_user_agent,
	http::{HttpClient, HttpRequest},
	obs::{self, FlowKind},
	session::{
		CallbackParams, SESSION_OAUTH_TOKEN, SESSION_OAUTH_TOKEN_SECRET, SessionError,
		SessionStore,
	},
	sign::Signer,
};

/// Authorization page variant chosen from the user agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizePage {
	/// Full desktop page (`/OAuth/authorize`).
	Desktop,
	/// Mobile page (`/m/authorize`).
	Mobile,
}

/// Redirect the application must issue to send the user to Plurk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRedirect {
	/// Value for the `Location` header.
	pub location: String,
	/// Which authorization page was selected.
	pub page: AuthorizePage,
	/// Request token embedded in the location.
	pub oauth_token: String,
}
impl AuthorizationRedirect {
	/// Status code to answer with.
	pub fn status(&self) -> StatusCode {
		StatusCode::FOUND
	}

	/// Builds a bodiless `302 Found` response for frameworks built on the `http` crate.
	pub fn to_response(&self) -> Result<http::Response<()>> {
		http::Response::builder()
			.status(self.status())
			.header(LOCATION, self.location.as_str())
			.body(())
			.map_err(|e| ConfigError::from(e).into())
	}
}

impl<C, S> PlurkClient<C, S>
where
	C: ?Sized + HttpClient,
	S: ?Sized + Signer,
{
	/// Starts the handshake: obtains a request token, stores it in `session`, and returns the
	/// redirect to the authorization page matching `user_agent`.
	///
	/// The request-token call is signed with consumer credentials only, whatever token the
	/// client currently holds.
	pub async fn start_authorization(
		&self,
		session: &dyn SessionStore,
		user_agent: &str,
	) -> Result<AuthorizationRedirect> {
		obs::observe(FlowKind::RequestToken, "start_authorization", async move {
			let request =
				self.consumer_signed_request(Method::GET, &self.endpoints.request_token)?;
			let pair = self.fetch_token_response(request).await?.token_pair()?;

			session.set(SESSION_OAUTH_TOKEN, pair.token.clone())?;
			session.set(SESSION_OAUTH_TOKEN_SECRET, pair.secret.expose().to_owned())?;

			Ok(self.authorization_redirect(pair.token, user_agent))
		})
		.await
	}

	/// Completes the handshake from the callback parameters and the session saved by
	/// [`PlurkClient::start_authorization`].
	///
	/// Fails with [`Error::TokenMismatch`] before any network call when the callback token
	/// differs from the session token. The client switches to the returned access token when
	/// the body carries both `oauth_token` and `oauth_token_secret`; the full decoded response
	/// is returned either way for the caller to persist.
	pub async fn complete_authorization(
		&mut self,
		callback: &CallbackParams,
		session: &dyn SessionStore,
	) -> Result<TokenResponse> {
		obs::observe(FlowKind::AccessToken, "complete_authorization", async move {
			let callback_token = callback
				.oauth_token
				.as_deref()
				.ok_or(Error::MissingCallbackParameter { name: "oauth_token" })?;
			let session_token = session.get(SESSION_OAUTH_TOKEN)?;

			if session_token.as_deref() != Some(callback_token) {
				return Err(Error::TokenMismatch);
			}

			let verifier = callback
				.oauth_verifier
				.as_deref()
				.ok_or(Error::MissingCallbackParameter { name: "oauth_verifier" })?;
			let session_secret = session
				.get(SESSION_OAUTH_TOKEN_SECRET)?
				.ok_or(SessionError::MissingValue { key: SESSION_OAUTH_TOKEN_SECRET })?;

			self.set_token(TokenPair::new(callback_token, session_secret));
			self.set_verifier(Some(verifier.to_owned()));

			let exchanged = self.exchange_verifier().await;

			self.set_verifier(None);

			let response = exchanged?;

			// A partial body keeps the request token; callers still get every decoded field.
			if let Ok(pair) = response.token_pair() {
				self.set_token(pair);
			}

			Ok(response)
		})
		.await
	}

	fn authorization_redirect(&self, oauth_token: String, user_agent: &str) -> AuthorizationRedirect {
		let (page, base) = if is_mobile_user_agent(user_agent) {
			(AuthorizePage::Mobile, &self.endpoints.authorize_mobile)
		} else {
			(AuthorizePage::Desktop, &self.endpoints.authorize)
		};
		let location = format!("{base}?oauth_token={oauth_token}");

		AuthorizationRedirect { location, page, oauth_token }
	}

	async fn exchange_verifier(&self) -> Result<TokenResponse> {
		let request = self.signed_request(Method::GET, &self.endpoints.access_token, &[])?;

		self.fetch_token_response(request).await
	}

	async fn fetch_token_response(&self, request: HttpRequest) -> Result<TokenResponse> {
		let response = self.send(request).await?;

		if !response.is_success() {
			return Err(TransportError::UnexpectedStatus {
				status: response.status.as_u16(),
				body: response.text(),
			}
			.into());
		}

		Ok(parse_token_response(&response.text()))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use parking_lot::Mutex;
	// self
	use super::*;
	use crate::{
		auth::ConsumerCredentials,
		config::Endpoints,
		http::{ApiResponse, HttpFuture},
		session::MemorySession,
		sign::HmacSha1Signer,
	};

	#[derive(Default)]
	struct ScriptedHttpClient {
		responses: Mutex<Vec<ApiResponse>>,
		requests: Mutex<Vec<HttpRequest>>,
	}
	impl ScriptedHttpClient {
		fn replying(bodies: &[(u16, &str)]) -> Self {
			let responses = bodies
				.iter()
				.rev()
				.map(|(status, body)| ApiResponse {
					status: StatusCode::from_u16(*status).expect("Fixture status should be valid."),
					body: body.as_bytes().to_vec(),
					..ApiResponse::default()
				})
				.collect();

			Self { responses: Mutex::new(responses), requests: Default::default() }
		}

		fn calls(&self) -> usize {
			self.requests.lock().len()
		}

		fn authorization(&self, idx: usize) -> String {
			self.requests.lock()[idx]
				.headers()
				.get(http::header::AUTHORIZATION)
				.and_then(|value| value.to_str().ok())
				.expect("Recorded request should be signed.")
				.to_owned()
		}
	}
	impl HttpClient for ScriptedHttpClient {
		fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
			self.requests.lock().push(request);

			let next = self.responses.lock().pop();

			Box::pin(async move { Ok(next.expect("Scripted transport ran out of responses.")) })
		}
	}

	fn client(transport: ScriptedHttpClient) -> PlurkClient<ScriptedHttpClient, HmacSha1Signer> {
		let credentials =
			ConsumerCredentials::new("app-key", "app-secret").expect("Credentials should be valid.");
		let endpoints = Endpoints::plurk().expect("Default endpoints should parse.");

		PlurkClient::with_parts(credentials, endpoints, transport, HmacSha1Signer)
	}

	fn seeded_session() -> MemorySession {
		let session = MemorySession::default();

		session.set(SESSION_OAUTH_TOKEN, "req-token".into()).expect("Session write should succeed.");
		session
			.set(SESSION_OAUTH_TOKEN_SECRET, "req-secret".into())
			.expect("Session write should succeed.");

		session
	}

	#[tokio::test]
	async fn start_authorization_saves_token_and_redirects_desktop() {
		let client = client(ScriptedHttpClient::replying(&[(
			200,
			"oauth_token=req-token&oauth_token_secret=req-secret&oauth_callback_confirmed=true",
		)]));
		let session = MemorySession::default();
		let redirect = client
			.start_authorization(&session, "Mozilla/5.0 (Windows NT 10.0)")
			.await
			.expect("Handshake should start.");

		assert_eq!(redirect.page, AuthorizePage::Desktop);
		assert_eq!(redirect.location, "https://www.plurk.com/OAuth/authorize?oauth_token=req-token");
		assert_eq!(redirect.oauth_token, "req-token");
		assert_eq!(
			session.get(SESSION_OAUTH_TOKEN).expect("Session read should succeed."),
			Some("req-token".into())
		);
		assert_eq!(
			session.get(SESSION_OAUTH_TOKEN_SECRET).expect("Session read should succeed."),
			Some("req-secret".into())
		);
		assert_eq!(client.http_client.calls(), 1);
		assert!(!client.http_client.authorization(0).contains("oauth_token="));
	}

	#[tokio::test]
	async fn start_authorization_redirects_mobile_agents() {
		let client = client(ScriptedHttpClient::replying(&[(
			200,
			"oauth_token=m-token&oauth_token_secret=m-secret",
		)]));
		let session = MemorySession::default();
		let redirect = client
			.start_authorization(&session, "Mozilla/5.0 (Linux; Android 14)")
			.await
			.expect("Handshake should start.");
		let response = redirect.to_response().expect("Redirect response should build.");

		assert_eq!(redirect.page, AuthorizePage::Mobile);
		assert_eq!(redirect.location, "https://www.plurk.com/m/authorize?oauth_token=m-token");
		assert_eq!(response.status(), StatusCode::FOUND);
		assert_eq!(
			response.headers().get(LOCATION).and_then(|value| value.to_str().ok()),
			Some(redirect.location.as_str())
		);
	}

	#[tokio::test]
	async fn start_authorization_surfaces_rejected_request_token() {
		let client = client(ScriptedHttpClient::replying(&[(401, "invalid consumer")]));
		let session = MemorySession::default();
		let err = client
			.start_authorization(&session, "")
			.await
			.expect_err("Rejected request token should fail.");

		assert!(matches!(
			err,
			Error::Transport(TransportError::UnexpectedStatus { status: 401, .. })
		));
		assert!(session.is_empty());
	}

	#[tokio::test]
	async fn complete_authorization_exchanges_and_switches_token() {
		let mut client = client(ScriptedHttpClient::replying(&[(
			200,
			"oauth_token=access-token&oauth_token_secret=access-secret&user_id=42",
		)]));
		let session = seeded_session();
		let response = client
			.complete_authorization(&CallbackParams::new("req-token", "verifier-1"), &session)
			.await
			.expect("Handshake should complete.");

		assert_eq!(response.oauth_token(), Some("access-token"));
		assert_eq!(response.get("user_id"), Some("42"));
		assert_eq!(client.token(), &TokenPair::new("access-token", "access-secret"));
		assert_eq!(client.verifier(), None);
		assert_eq!(client.http_client.calls(), 1);

		let authorization = client.http_client.authorization(0);

		assert!(authorization.contains("oauth_token=\"req-token\""));
		assert!(authorization.contains("oauth_verifier=\"verifier-1\""));
	}

	#[tokio::test]
	async fn partial_access_response_is_returned_and_keeps_request_token() {
		let mut client =
			client(ScriptedHttpClient::replying(&[(200, "oauth_token=access-token&user_id=42")]));
		let session = seeded_session();
		let response = client
			.complete_authorization(&CallbackParams::new("req-token", "verifier-1"), &session)
			.await
			.expect("Partial access response should still be returned.");

		assert_eq!(response.len(), 2);
		assert_eq!(response.oauth_token(), Some("access-token"));
		assert_eq!(response.oauth_token_secret(), None);
		assert_eq!(response.get("user_id"), Some("42"));
		assert_eq!(client.token(), &TokenPair::new("req-token", "req-secret"));
		assert_eq!(client.verifier(), None);
		assert_eq!(client.http_client.calls(), 1);
	}

	#[tokio::test]
	async fn complete_authorization_rejects_mismatched_token_without_network() {
		let mut client = client(ScriptedHttpClient::default());
		let session = seeded_session();
		let err = client
			.complete_authorization(&CallbackParams::new("forged-token", "verifier-1"), &session)
			.await
			.expect_err("Mismatched token should fail.");

		assert!(matches!(err, Error::TokenMismatch));
		assert_eq!(client.http_client.calls(), 0);
		assert!(client.token().is_empty());
	}

	#[tokio::test]
	async fn complete_authorization_requires_session_token() {
		let mut client = client(ScriptedHttpClient::default());
		let err = client
			.complete_authorization(
				&CallbackParams::new("req-token", "verifier-1"),
				&MemorySession::default(),
			)
			.await
			.expect_err("Empty session should fail.");

		assert!(matches!(err, Error::TokenMismatch));
		assert_eq!(client.http_client.calls(), 0);
	}

	#[tokio::test]
	async fn complete_authorization_requires_callback_parameters() {
		let mut client = client(ScriptedHttpClient::default());
		let session = seeded_session();
		let err = client
			.complete_authorization(&CallbackParams::from_query("oauth_token=req-token"), &session)
			.await
			.expect_err("Missing verifier should fail.");

		assert!(matches!(err, Error::MissingCallbackParameter { name: "oauth_verifier" }));

		let err = client
			.complete_authorization(&CallbackParams::default(), &session)
			.await
			.expect_err("Missing token should fail.");

		assert!(matches!(err, Error::MissingCallbackParameter { name: "oauth_token" }));
		assert_eq!(client.http_client.calls(), 0);
	}

	#[tokio::test]
	async fn failed_exchange_clears_verifier() {
		let mut client = client(ScriptedHttpClient::replying(&[(400, "verifier expired")]));
		let session = seeded_session();
		let err = client
			.complete_authorization(&CallbackParams::new("req-token", "stale"), &session)
			.await
			.expect_err("Rejected exchange should fail.");

		assert!(matches!(
			err,
			Error::Transport(TransportError::UnexpectedStatus { status: 400, .. })
		));
		assert_eq!(client.verifier(), None);
		assert_eq!(client.token(), &TokenPair::new("req-token", "req-secret"));
	}
}
