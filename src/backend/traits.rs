use bytes::Bytes;
use url::Url;
use crate::error::AkismetError;

/// Content type of every request body sent to Akismet
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP transport used to reach the Akismet service.
///
/// Implementations post a form-encoded `body` to `url` with the given extra headers and
/// return the response body as text. Non-success statuses must be reported as errors.
#[maybe_async::maybe_async]
pub trait Transport {
	async fn post(
		&self,
		url: &Url,
		body: Bytes,
		headers: &[(&'static str, &str)],
	) -> Result<String, AkismetError>;
}

