use bytes::Bytes;
use reqwest::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use url::Url;
use crate::backend::traits::*;
use crate::config::Config;
use crate::error::AkismetError;

/// Transport built on `reqwest`
#[derive(Debug, Clone)]
pub struct AsyncClient {
	inner: Client,
}

pub fn async_client(options: &Config) -> Result<AsyncClient, AkismetError> {
	let client = Client::builder()
		.timeout(options.request_timeout()?);

	let client = if let Some(ref proxy) = options.proxy_config {
		let mut proxy_settings = reqwest::Proxy::all(proxy.proxy_url.as_str())
			.map_err(|e| AkismetError::HttpError(e.to_string()))?;
		if let Some(ref username) = proxy.username {
			proxy_settings = proxy_settings
				.basic_auth(username, proxy.password.as_deref().unwrap_or_default());
		}
		client.proxy(proxy_settings)
	} else {
		client
	};

	Ok(AsyncClient {
		inner: client.build()
			.map_err(|e| AkismetError::HttpError(e.to_string()))?,
	})
}

#[maybe_async::maybe_async]
impl Transport for AsyncClient {
	async fn post(
		&self,
		url: &Url,
		body: Bytes,
		headers: &[(&'static str, &str)],
	) -> Result<String, AkismetError> {
		let mut req = self.inner.post(url.clone())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.body(body);
		for (name, value) in headers {
			req = req.header(*name, HeaderValue::from_str(value)?);
		}

		let response = req.send().await
			.map_err(|e| AkismetError::HttpError(e.to_string()))?;

		if !response.status().is_success() {
			return Err(AkismetError::HttpError(format!(
				"Status: {}",
				response.status()
			)));
		}

		Ok(response.text().await?)
	}
}
