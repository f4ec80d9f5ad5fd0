//! Error handling for the Akismet API client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AkismetError {
    /// A required value is absent: the API key, the blog URL, or one of the
    /// per-call `user_ip`/`user_agent` fields.
    #[error("Required field missing: {0}")]
    FieldMissing(String),

    /// A declared field mapping points to an attribute the object does not expose.
    #[error("Mapping for `{field}` on `{comment_type}` points to unknown attribute `{capability}`")]
    MappingError {
        comment_type: String,
        field: String,
        capability: String,
    },

    /// No mapping is declared and the object lacks the canonical attribute itself.
    #[error("`{comment_type}` has no attribute `{attribute}`")]
    AttributeMissing {
        comment_type: String,
        attribute: String,
    },

    #[error("Key verification failed: {0}")]
    KeyVerificationFailed(String),

    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Form encoding error: {0}")]
    EncodeError(#[from] serde_urlencoded::ser::Error),

    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    ParseError(#[from] url::ParseError),

    #[cfg(feature = "async")]
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[cfg(feature = "async")]
    #[error("HTTP error: {0}")]
    HTTPError(#[from] reqwest::Error),

    #[cfg(feature = "sync")]
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(#[from] attohttpc::header::InvalidHeaderValue),

    #[cfg(feature = "sync")]
    #[error("HTTP error: {0}")]
    HTTPError(#[from] attohttpc::Error),
}

impl AkismetError {
    /// True for failures detected locally, before any request is sent.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            AkismetError::FieldMissing(_)
                | AkismetError::MappingError { .. }
                | AkismetError::AttributeMissing { .. }
                | AkismetError::ConfigError(_)
                | AkismetError::EncodeError(_)
                | AkismetError::ParseError(_)
        )
    }
}
