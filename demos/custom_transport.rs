//! Plugs an in-process [`HttpClient`] into [`PlurkClient`] and runs the handshake offline.
//!
//! 1. Implement [`HttpClient::execute`] to answer the token endpoints and `/APP/` calls.
//! 2. Pass the transport and a signer to [`PlurkClient::with_parts`].
//! 3. Drive the handshake with a [`MemorySession`] standing in for the web framework's session.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use http::StatusCode;
// self
use plurk_oauth::{
	auth::ConsumerCredentials,
	client::PlurkClient,
	config::Endpoints,
	http::{ApiResponse, HttpClient, HttpFuture, HttpRequest},
	session::{CallbackParams, MemorySession},
	sign::HmacSha1Signer,
};

/// Answers each known path with a canned Plurk body and `404` otherwise.
struct CannedPlurk {
	routes: HashMap<&'static str, &'static str>,
}
impl CannedPlurk {
	fn new() -> Self {
		let routes = HashMap::from([
			("/OAuth/request_token", "oauth_token=req-demo&oauth_token_secret=req-demo-secret"),
			("/OAuth/access_token", "oauth_token=acc-demo&oauth_token_secret=acc-demo-secret"),
			("/APP/Users/me", r#"{"id":1,"nick_name":"demo"}"#),
		]);

		Self { routes }
	}
}
impl HttpClient for CannedPlurk {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		let response = match self.routes.get(request.uri().path()) {
			Some(body) => ApiResponse { body: body.as_bytes().to_vec(), ..ApiResponse::default() },
			None => ApiResponse { status: StatusCode::NOT_FOUND, ..ApiResponse::default() },
		};

		Box::pin(async move { Ok(response) })
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = ConsumerCredentials::new("demo-key", "demo-secret")?;
	let mut client: PlurkClient<CannedPlurk, HmacSha1Signer> = PlurkClient::with_parts(
		credentials,
		Endpoints::builder().origin("https://plurk.test").build()?,
		CannedPlurk::new(),
		HmacSha1Signer,
	);
	let session = MemorySession::default();
	let redirect = client.start_authorization(&session, "Mozilla/5.0 (iPhone)").await?;

	println!("Redirect ({:?}) to {}.", redirect.page, redirect.location);

	let callback = CallbackParams::new(redirect.oauth_token.clone(), "demo-verifier");
	let access = client.complete_authorization(&callback, &session).await?;

	println!("Access token: {}.", access.oauth_token().unwrap_or_default());

	let me = client.get("Users/me").await?;
	let profile: serde_json::Value = me.json()?;

	println!("Signed in as {}.", profile["nick_name"]);

	let missing = client.get("Nope/missing").await?;

	println!("Unknown targets come back untouched: HTTP {}.", missing.status);

	Ok(())
}
