#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use plurk_oauth::{
	auth::{ConsumerCredentials, TokenPair},
	client::ReqwestPlurkClient,
	config::Endpoints,
	error::{Error, TransportError},
	flows::AuthorizePage,
	http::ReqwestHttpClient,
	session::{
		CallbackParams, MemorySession, SESSION_OAUTH_TOKEN, SESSION_OAUTH_TOKEN_SECRET,
		SessionStore,
	},
	sign::HmacSha1Signer,
};

const CONSUMER_KEY: &str = "consumer-it";
const CONSUMER_SECRET: &str = "consumer-secret-it";
const DESKTOP_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0";
const MOBILE_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";

fn build_client(server: &MockServer) -> ReqwestPlurkClient {
	let credentials = ConsumerCredentials::new(CONSUMER_KEY, CONSUMER_SECRET)
		.expect("Consumer credentials should be valid for handshake tests.");
	let endpoints = Endpoints::builder()
		.origin(&server.base_url())
		.build()
		.expect("Mock endpoints should parse successfully.");

	ReqwestPlurkClient::with_parts(
		credentials,
		endpoints,
		ReqwestHttpClient::default(),
		HmacSha1Signer,
	)
}

#[tokio::test]
async fn full_handshake_switches_client_to_access_token() {
	let server = MockServer::start_async().await;
	let mut client = build_client(&server);
	let session = MemorySession::default();
	let request_token = server
		.mock_async(|when, then| {
			when.method(GET).path("/OAuth/request_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "text/plain")
				.body("oauth_token=req-it&oauth_token_secret=req-secret-it&oauth_callback_confirmed=true");
		})
		.await;
	let redirect = client
		.start_authorization(&session, DESKTOP_AGENT)
		.await
		.expect("Handshake should start successfully.");

	request_token.assert_async().await;

	assert_eq!(redirect.page, AuthorizePage::Desktop);
	assert_eq!(
		redirect.location,
		format!("{}/OAuth/authorize?oauth_token=req-it", server.base_url())
	);
	assert_eq!(
		session.get(SESSION_OAUTH_TOKEN_SECRET).expect("Session read should succeed."),
		Some("req-secret-it".into())
	);

	let access_token = server
		.mock_async(|when, then| {
			when.method(GET).path("/OAuth/access_token").header_exists("authorization");
			then.status(200).body(
				"oauth_token=access-it&oauth_token_secret=access-secret-it&user_id=3141592",
			);
		})
		.await;
	let callback =
		CallbackParams::from_query("?oauth_token=req-it&oauth_verifier=271828&lang=en");
	let access = client
		.complete_authorization(&callback, &session)
		.await
		.expect("Handshake should complete successfully.");

	access_token.assert_async().await;

	assert_eq!(access.oauth_token(), Some("access-it"));
	assert_eq!(access.oauth_token_secret(), Some("access-secret-it"));
	assert_eq!(access.get("user_id"), Some("3141592"));
	assert_eq!(client.token(), &TokenPair::new("access-it", "access-secret-it"));
	assert_eq!(client.verifier(), None);
}

#[tokio::test]
async fn mobile_agents_are_sent_to_mobile_page() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let session = MemorySession::default();
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/OAuth/request_token");
			then.status(200).body("oauth_token=mobile-it&oauth_token_secret=mobile-secret-it");
		})
		.await;
	let redirect = client
		.start_authorization(&session, MOBILE_AGENT)
		.await
		.expect("Handshake should start successfully.");

	mock.assert_async().await;

	assert_eq!(redirect.page, AuthorizePage::Mobile);
	assert_eq!(redirect.location, format!("{}/m/authorize?oauth_token=mobile-it", server.base_url()));
}

#[tokio::test]
async fn mismatched_callback_never_reaches_access_token_endpoint() {
	let server = MockServer::start_async().await;
	let mut client = build_client(&server);
	let session = MemorySession::default();

	session.set(SESSION_OAUTH_TOKEN, "req-it".into()).expect("Session write should succeed.");
	session
		.set(SESSION_OAUTH_TOKEN_SECRET, "req-secret-it".into())
		.expect("Session write should succeed.");

	let access_token = server
		.mock_async(|when, then| {
			when.method(GET).path("/OAuth/access_token");
			then.status(200).body("oauth_token=should-not&oauth_token_secret=be-used");
		})
		.await;
	let err = client
		.complete_authorization(&CallbackParams::new("injected", "271828"), &session)
		.await
		.expect_err("Mismatched callback token should be rejected.");

	assert!(matches!(err, Error::TokenMismatch));

	access_token.assert_calls_async(0).await;

	assert!(client.token().is_empty());
}

#[tokio::test]
async fn rejected_request_token_is_a_transport_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let session = MemorySession::default();
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/OAuth/request_token");
			then.status(401).body("Invalid signature");
		})
		.await;
	let err = client
		.start_authorization(&session, DESKTOP_AGENT)
		.await
		.expect_err("Rejected request token call should fail.");

	mock.assert_async().await;

	match err {
		Error::Transport(TransportError::UnexpectedStatus { status, body }) => {
			assert_eq!(status, 401);
			assert_eq!(body, "Invalid signature");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert!(session.is_empty(), "Session must stay untouched when the request token fails.");
}
