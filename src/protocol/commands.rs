//! Commands that can be sent to the server

use url::Url;

use crate::config::Config;
use crate::error::AkismetError;

/// Commands that can be sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AkismetCommand {
	VerifyKey,
	CommentCheck,
	SubmitSpam,
	SubmitHam,
}

/// Ephemeral endpoint representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AkismetEndpoint<'a> {
	pub path: &'a str,
	pub command: AkismetCommand,
	/// Whether the endpoint lives under the `{api_key}.{host}` namespace
	pub key_scoped: bool,
}

impl<'a> AkismetEndpoint<'a> {
	/// Create a new endpoint from a command
	pub fn from_command(command: AkismetCommand) -> AkismetEndpoint<'a> {
		match command {
			AkismetCommand::VerifyKey => Self {
				path: "verify-key",
				command,
				key_scoped: false,
			},
			AkismetCommand::CommentCheck => Self {
				path: "comment-check",
				command,
				key_scoped: true,
			},
			AkismetCommand::SubmitSpam => Self {
				path: "submit-spam",
				command,
				key_scoped: true,
			},
			AkismetCommand::SubmitHam => Self {
				path: "submit-ham",
				command,
				key_scoped: true,
			},
		}
	}

	/// Full URL of the endpoint for the given configuration.
	///
	/// Key-scoped endpoints need the API key and fail with `FieldMissing` without one.
	pub fn url(&self, config: &Config) -> Result<Url, AkismetError> {
		let host = if self.key_scoped {
			format!("{}.{}", config.api_key()?, config.host)
		} else {
			config.host.clone()
		};
		let url = format!(
			"{}://{}:{}/{}/{}",
			config.scheme, host, config.port, config.version, self.path
		);
		Ok(Url::parse(&url)?)
	}
}
