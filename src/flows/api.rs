//! Signed `/APP/` calls.
//!
//! Responses are handed back exactly as the transport produced them; Plurk reports API-level
//! failures through status codes and JSON `error_text` bodies that callers interpret.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::PlurkClient,
	http::{ApiResponse, HttpClient},
	obs::{self, FlowKind},
	sign::Signer,
};

impl<C, S> PlurkClient<C, S>
where
	C: ?Sized + HttpClient,
	S: ?Sized + Signer,
{
	/// Issues a signed `GET` for `target`, relative to the API base (e.g. `Users/me`).
	pub async fn get(&self, target: &str) -> Result<ApiResponse> {
		self.call(Method::GET, target, Vec::new(), "get").await
	}

	/// Issues a signed `POST` for `target` with `params` sent as a form-encoded body.
	pub async fn post<I, K, V>(&self, target: &str, params: I) -> Result<ApiResponse>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let form = params.into_iter().map(|(key, value)| (key.into(), value.into())).collect();

		self.call(Method::POST, target, form, "post").await
	}

	async fn call(
		&self,
		method: Method,
		target: &str,
		form: Vec<(String, String)>,
		stage: &'static str,
	) -> Result<ApiResponse> {
		obs::observe(FlowKind::Api, stage, async move {
			let url = self.endpoints.api_url(target)?;
			let request = self.signed_request(method, &url, &form)?;

			self.send(request).await
		})
		.await
	}
}
