//! Walks through the full Plurk handshake against the live service.
//!
//! Set `PLURK_CONSUMER_KEY` and `PLURK_CONSUMER_SECRET`, run the demo, open the printed URL,
//! approve the app, then paste the URL Plurk redirected to (or just its query string).

// std
use std::{
	env,
	io::{self, BufRead},
};
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use plurk_oauth::{
	client::ReqwestPlurkClient,
	session::{CallbackParams, MemorySession},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let key = env::var("PLURK_CONSUMER_KEY")?;
	let secret = env::var("PLURK_CONSUMER_SECRET")?;
	let mut client = ReqwestPlurkClient::new(key, secret)?;
	let session = MemorySession::default();
	let redirect = client.start_authorization(&session, "plurk-oauth demo").await?;

	println!("Open {} and approve the app.", redirect.location);
	println!("Paste the callback URL or query string:");

	let line = io::stdin().lock().lines().next().ok_or_else(|| eyre!("No callback supplied."))??;
	let line = line.trim();
	let callback = match url::Url::parse(line) {
		Ok(url) => CallbackParams::from_url(&url),
		Err(_) => CallbackParams::from_query(line),
	};
	let access = client.complete_authorization(&callback, &session).await?;

	println!(
		"Persist this access token pair: {} / {}.",
		access.oauth_token().unwrap_or_default(),
		access.oauth_token_secret().unwrap_or_default()
	);

	let me = client.get("Users/me").await?;

	println!("GET /APP/Users/me -> {}: {}", me.status, me.text());

	Ok(())
}
