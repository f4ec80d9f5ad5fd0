use attohttpc::{self, Session, ProxySettingsBuilder};
use attohttpc::header::CONTENT_TYPE;
use bytes::Bytes;
use std::str::FromStr;
use url::Url;
use crate::backend::traits::*;
use crate::config::Config;
use crate::error::AkismetError;

/// Transport built on `attohttpc`
pub struct SyncClient {
	inner: Session,
}

pub fn sync_client(options: &Config) -> Result<SyncClient, AkismetError> {
	let mut client = Session::new();
	client.timeout(options.request_timeout()?);

	if let Some(ref proxy) = options.proxy_config {
		let mut proxy_url = Url::from_str(&proxy.proxy_url)?;
		if let Some(ref username) = proxy.username {
			proxy_url.set_username(username)
				.map_err(|_| AkismetError::ConfigError("proxy URL cannot carry credentials".to_string()))?;
			proxy_url.set_password(proxy.password.as_deref())
				.map_err(|_| AkismetError::ConfigError("proxy URL cannot carry credentials".to_string()))?;
		}
		let proxy = ProxySettingsBuilder::new()
			.http_proxy(proxy_url.clone())
			.https_proxy(proxy_url)
			.build();
		client.proxy_settings(proxy);
	}

	Ok(SyncClient {
		inner: client,
	})
}

impl Transport for SyncClient {
	fn post(
		&self,
		url: &Url,
		body: Bytes,
		headers: &[(&'static str, &str)],
	) -> Result<String, AkismetError> {
		let mut req = self.inner.post(url.as_str())
			.bytes(body.to_vec())
			.try_header(CONTENT_TYPE, FORM_CONTENT_TYPE)?;
		for (name, value) in headers {
			req = req.try_header(*name, *value)?;
		}

		let response = req.send()
			.map_err(|e| AkismetError::HttpError(e.to_string()))?;

		if !response.is_success() {
			return Err(AkismetError::HttpError(format!(
				"Status: {}",
				response.status()
			)));
		}

		Ok(response.text()?)
	}
}
