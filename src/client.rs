//! The Akismet client: composes comment payloads and talks to the service.

use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::backend::Transport;
use crate::config::{CommentEnvelope, Config};
use crate::error::AkismetError;
use crate::mapping::{CommentField, Commentable, MappingRegistry};
use crate::protocol::commands::{AkismetCommand, AkismetEndpoint};
use crate::protocol::payload::{is_valid_key, parse_verdict, Payload, VerifyKeyForm};

/// Per-call fields the service requires on every check and report
const REQUIRED_FIELDS: [&str; 2] = ["user_ip", "user_agent"];

/// Akismet client bound to one configuration, one mapping registry and one transport.
///
/// The configuration is shared by every call made through the client. Calls work on a
/// snapshot taken when they start, so a concurrent [`Akismet::setup`] only affects
/// calls started after it. Transport settings (`timeout`, `proxy_config`) are read
/// once, when the default transport is built.
pub struct Akismet<T> {
	config: RwLock<Config>,
	registry: MappingRegistry,
	transport: T,
}

#[cfg(feature = "async")]
impl Akismet<crate::backend::async_client::AsyncClient> {
	/// Client using the `reqwest` transport
	pub fn new(config: Config) -> Result<Self, AkismetError> {
		let transport = crate::backend::async_client::async_client(&config)?;
		Ok(Self::with_transport(config, transport))
	}
}

#[cfg(feature = "sync")]
impl Akismet<crate::backend::sync_client::SyncClient> {
	/// Client using the `attohttpc` transport
	pub fn new(config: Config) -> Result<Self, AkismetError> {
		let transport = crate::backend::sync_client::sync_client(&config)?;
		Ok(Self::with_transport(config, transport))
	}
}

impl<T> Akismet<T> {
	pub fn with_transport(config: Config, transport: T) -> Self {
		Akismet {
			config: RwLock::new(config),
			registry: MappingRegistry::new(),
			transport,
		}
	}

	/// Replace the mapping registry
	pub fn with_registry(mut self, registry: MappingRegistry) -> Self {
		self.registry = registry;
		self
	}

	/// Declare `capability` as the attribute backing `field` for objects of `comment_type`
	pub fn map(
		&mut self,
		comment_type: impl Into<String>,
		field: CommentField,
		capability: impl Into<String>,
	) -> &mut Self {
		self.registry.map(comment_type, field, capability);
		self
	}

	pub fn registry(&self) -> &MappingRegistry {
		&self.registry
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Snapshot of the current configuration
	pub fn config(&self) -> Config {
		self.config
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	/// Mutate the configuration in place
	///
	/// ```rust
	/// # use akismet_client::{Akismet, config::Config};
	/// # #[cfg(feature = "async")]
	/// # fn main() -> Result<(), akismet_client::error::AkismetError> {
	/// let client = Akismet::new(Config::default())?;
	/// client.setup(|c| {
	/// 	c.api_key = Some("112c434vH6OiJjTpyO".to_string());
	/// 	c.blog = Some("http://example.com".to_string());
	/// });
	/// assert_eq!(client.config().blog()?, "http://example.com");
	/// # Ok(())
	/// # }
	/// # #[cfg(not(feature = "async"))]
	/// # fn main() {}
	/// ```
	pub fn setup<F>(&self, f: F)
	where
		F: FnOnce(&mut Config),
	{
		f(&mut self.write_config());
	}

	fn write_config(&self) -> RwLockWriteGuard<'_, Config> {
		self.config.write().unwrap_or_else(PoisonError::into_inner)
	}

	/// Build the request body for `object` without sending anything.
	///
	/// Mapped comment fields come first; `extra` is merged on top and wins on
	/// collisions.
	pub fn payload<C, E>(&self, object: &C, extra: E) -> Result<Payload, AkismetError>
	where
		C: Commentable + ?Sized,
		E: Into<CommentEnvelope>,
	{
		let config = self.config();
		self.compose(&config, object, extra.into().into_iter().collect())
	}

	fn compose<C>(
		&self,
		config: &Config,
		object: &C,
		extra: Vec<(String, String)>,
	) -> Result<Payload, AkismetError>
	where
		C: Commentable + ?Sized,
	{
		let mut payload = Payload::compose(&self.registry, object, config.blog()?)?;
		payload.merge(extra);
		Ok(payload)
	}
}

fn require_fields(fields: &[(String, String)]) -> Result<(), AkismetError> {
	for required in REQUIRED_FIELDS {
		if !fields.iter().any(|(key, _)| key == required) {
			let present: Vec<&str> = fields.iter().map(|(key, _)| key.as_str()).collect();
			return Err(AkismetError::FieldMissing(format!(
				"user_ip or user_agent missing from {present:?}"
			)));
		}
	}
	Ok(())
}

#[maybe_async::maybe_async]
impl<T: Transport> Akismet<T> {
	/// Ask the service whether `object` is spam
	pub async fn check<C, E>(&self, object: &C, extra: E) -> Result<bool, AkismetError>
	where
		C: Commentable + ?Sized,
		E: Into<CommentEnvelope>,
	{
		self.request(AkismetCommand::CommentCheck, object, extra.into()).await
	}

	/// Report `object` as spam that was missed
	pub async fn submit_spam<C, E>(&self, object: &C, extra: E) -> Result<bool, AkismetError>
	where
		C: Commentable + ?Sized,
		E: Into<CommentEnvelope>,
	{
		self.request(AkismetCommand::SubmitSpam, object, extra.into()).await
	}

	/// Report `object` as a legitimate comment that was flagged
	pub async fn submit_ham<C, E>(&self, object: &C, extra: E) -> Result<bool, AkismetError>
	where
		C: Commentable + ?Sized,
		E: Into<CommentEnvelope>,
	{
		self.request(AkismetCommand::SubmitHam, object, extra.into()).await
	}

	/// Verify the configured API key against the configured blog.
	///
	/// A rejected key is reported as `KeyVerificationFailed` and clears the
	/// verified flag, so the next check or report verifies again before sending.
	pub async fn verify_key(&self) -> Result<(), AkismetError> {
		let config = self.config();
		let blog = config.blog()?;
		let url = AkismetEndpoint::from_command(AkismetCommand::VerifyKey).url(&config)?;
		let body = VerifyKeyForm {
			key: config.api_key()?,
			blog,
		}
		.to_form()?;

		debug!(%url, "verifying api key");
		let reply = self
			.transport
			.post(&url, body, &[("User-Agent", config.user_agent.as_str())])
			.await?;

		if !is_valid_key(&reply) {
			self.write_config().key_verified = false;
			warn!(blog, reply = %reply, "api key rejected");
			return Err(AkismetError::KeyVerificationFailed(format!(
				"the api key for {blog} has not been verified"
			)));
		}

		self.write_config().key_verified = true;
		info!(blog, "api key verified");
		Ok(())
	}

	async fn request<C>(
		&self,
		command: AkismetCommand,
		object: &C,
		extra: CommentEnvelope,
	) -> Result<bool, AkismetError>
	where
		C: Commentable + ?Sized,
	{
		let config = self.config();
		let extra: Vec<(String, String)> = extra.into_iter().collect();
		require_fields(&extra)?;

		let endpoint = AkismetEndpoint::from_command(command);
		let body = self.compose(&config, object, extra)?.to_form()?;
		let url = endpoint.url(&config)?;

		if !config.key_verified {
			self.verify_key().await?;
		}

		debug!(command = ?endpoint.command, comment_type = %object.comment_type(), "sending comment");
		let reply = self
			.transport
			.post(&url, body, &[("User-Agent", config.user_agent.as_str())])
			.await?;

		let verdict = parse_verdict(&reply);
		debug!(command = ?endpoint.command, verdict, "akismet replied");
		Ok(verdict)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn required_fields_present() {
		let fields = vec![
			("user_agent".to_string(), "curl-5".to_string()),
			("user_ip".to_string(), "192.168.0.1".to_string()),
		];
		assert!(require_fields(&fields).is_ok());
	}

	#[test]
	fn required_fields_absent() {
		let only_ip = vec![("user_ip".to_string(), "192.168.0.1".to_string())];
		assert!(matches!(require_fields(&only_ip), Err(AkismetError::FieldMissing(_))));

		let only_agent = vec![("user_agent".to_string(), "curl-5".to_string())];
		assert!(matches!(require_fields(&only_agent), Err(AkismetError::FieldMissing(_))));

		assert!(matches!(require_fields(&[]), Err(AkismetError::FieldMissing(_))));
	}

	#[cfg(feature = "async")]
	#[test]
	fn client_is_shareable() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Akismet<crate::backend::async_client::AsyncClient>>();
	}

	#[test]
	fn setup_is_visible_to_snapshots() {
		let client = Akismet::with_transport(Config::default(), ());
		let before = client.config();
		client.setup(|c| {
			c.host = "test.com".to_string();
			c.port = 8080;
			c.key_verified = true;
		});
		let after = client.config();
		assert_eq!(before.host, "rest.akismet.com");
		assert_eq!(after.host, "test.com");
		assert_eq!(after.port, 8080);
		assert!(after.key_verified);
	}
}
