//!
//! ## Configuration for akismet-client
//!
//! The `Config` struct holds the service endpoint, the credentials and the transport
//! settings. `CommentEnvelope` carries the per-request facts (client IP, user agent, ...)
//! that accompany every check or report.
//!

use std::collections::HashMap;
use std::iter::IntoIterator;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::AkismetError;

/// Default value of the `User-Agent` header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("akismet-client ", env!("CARGO_PKG_VERSION"));

/// Proxy configuration for the Akismet client
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    /// Proxy server URL
    pub proxy_url: String,

    /// Optional username for proxy authentication
    pub username: Option<String>,

    /// Optional password for proxy authentication
    pub password: Option<String>,
}

/// Destination of the client's log output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stdout,
    Stderr,
    /// Append to a file
    File(PathBuf),
    /// Install no subscriber at all
    Off,
}

impl FromStr for LogTarget {
    type Err = AkismetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(AkismetError::ConfigError("empty log target".to_string())),
            "stdout" => Ok(LogTarget::Stdout),
            "stderr" => Ok(LogTarget::Stderr),
            "off" | "none" => Ok(LogTarget::Off),
            path => Ok(LogTarget::File(PathBuf::from(path))),
        }
    }
}

/// Per-request data sent along with the comment fields.
///
/// `user_ip` and `user_agent` describe the request that submitted the comment and are
/// required by the service; they are validated when the request is composed.
#[derive(TypedBuilder, Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CommentEnvelope {
    /// IP address of the comment submitter
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ip: Option<String>,

    /// User agent of the comment submitter's browser
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Content of the HTTP_REFERER header
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,

    /// Full URL of the entry the comment was posted to
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    /// Anything else, e.g. the raw server environment. Passed through untouched and
    /// allowed to override the mapped comment fields.
    #[builder(default)]
    #[serde(flatten)]
    pub additional_fields: HashMap<String, String>,
}

impl IntoIterator for CommentEnvelope {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    /// Flatten the envelope into form fields
    fn into_iter(mut self) -> Self::IntoIter {
        // Named fields win over identically named additional ones
        if let Some(user_ip) = self.user_ip {
            self.additional_fields.insert("user_ip".to_string(), user_ip);
        }
        if let Some(user_agent) = self.user_agent {
            self.additional_fields.insert("user_agent".to_string(), user_agent);
        }
        if let Some(referrer) = self.referrer {
            self.additional_fields.insert("referrer".to_string(), referrer);
        }
        if let Some(permalink) = self.permalink {
            self.additional_fields.insert("permalink".to_string(), permalink);
        }
        self.additional_fields.into_iter()
    }
}

impl From<HashMap<String, String>> for CommentEnvelope {
    fn from(additional_fields: HashMap<String, String>) -> Self {
        CommentEnvelope {
            additional_fields,
            ..Default::default()
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for CommentEnvelope
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<HashMap<String, String>>()
            .into()
    }
}

/// Configuration for Akismet client
#[derive(TypedBuilder, Debug, Clone, PartialEq)]
pub struct Config {
    /// Akismet REST host
    #[builder(default = "rest.akismet.com".to_string(), setter(into))]
    pub host: String,

    #[builder(default = 80)]
    pub port: u16,

    /// Protocol version, used as the first path segment
    #[builder(default = "1.1".to_string(), setter(into))]
    pub version: String,

    /// URL scheme of every request
    #[builder(default = "http".to_string(), setter(into))]
    pub scheme: String,

    /// Akismet API key
    #[builder(default, setter(strip_option, into))]
    pub api_key: Option<String>,

    /// Full URL of the blog the comments belong to
    #[builder(default, setter(strip_option, into))]
    pub blog: Option<String>,

    /// Set once the API key has been accepted by the service
    #[builder(default = false)]
    pub key_verified: bool,

    /// Value of the `User-Agent` header
    #[builder(default = DEFAULT_USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,

    /// Where log output goes. The client only emits `tracing` events; pass this to
    /// `logging::init` to install a subscriber when the application has none.
    #[builder(default)]
    pub log: LogTarget,

    /// Timeout duration for requests, in seconds
    #[builder(default = 30.0)]
    pub timeout: f64,

    /// Proxy configuration for the HTTP client
    #[builder(default, setter(strip_option))]
    pub proxy_config: Option<ProxyConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

impl Config {
    /// The configured API key, or `FieldMissing` if none was set
    pub fn api_key(&self) -> Result<&str, AkismetError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AkismetError::FieldMissing("You must provide an api-key".to_string()))
    }

    /// The configured blog URL, or `FieldMissing` if none was set
    pub fn blog(&self) -> Result<&str, AkismetError> {
        self.blog.as_deref().ok_or_else(|| {
            AkismetError::FieldMissing("You must provide your blog full uri".to_string())
        })
    }

    /// Request timeout as a `Duration`; the configured value must be positive and
    /// representable
    pub fn request_timeout(&self) -> Result<Duration, AkismetError> {
        match Duration::try_from_secs_f64(self.timeout) {
            Ok(timeout) if !timeout.is_zero() => Ok(timeout),
            _ => Err(AkismetError::ConfigError(format!("invalid timeout: {}", self.timeout))),
        }
    }
}
