//!# Akismet Client for Rust
//!
//! This crate connects comment-like domain objects (blog comments, forum posts) to the
//! Akismet spam detection service. It can check a comment, report missed spam and report
//! false positives. It supports both synchronous and asynchronous operations using the
//! `attohttpc` and `reqwest` libraries, respectively.
//!
//! ## Features
//!
//! - **Sync**: Synchronous client using `attohttpc`.
//! - **Async**: Asynchronous client using `reqwest`.
//! - Per-type field mappings, so any struct can supply the four comment fields under its
//!   own attribute names.
//! - API key verification on first use, cached for the lifetime of the client.

// Ensure async and sync features are mutually exclusive
#[cfg(all(feature = "async", feature = "sync"))]
compile_error!("Features 'async' and 'sync' are mutually exclusive. Please enable only one.");

#[cfg(not(any(feature = "async", feature = "sync")))]
compile_error!("Either 'async' or 'sync' feature must be enabled.");

pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod protocol;

pub mod backend;
mod client;

pub use client::Akismet;
pub use config::{CommentEnvelope, Config};
pub use error::AkismetError;
pub use mapping::{CommentField, Commentable, MappingRegistry};

#[cfg(feature = "sync")]
pub use backend::sync_client::SyncClient;
/// ### Synchronous Client
///
/// This example demonstrates how to check a comment using the synchronous client.
///
/// ```rust,no_run
/// # #[cfg(feature = "sync")]
/// # fn main() -> Result<(), akismet_client::AkismetError> {
/// use akismet_client::{commentable, Akismet, CommentEnvelope, CommentField, Config};
///
/// struct Post { author: String, email: String, url: String, text: String }
/// commentable!(Post { author, email, url, text });
///
/// let config = Config::builder()
///     .api_key("1234g54w5g54")
///     .blog("http://blog.com")
///     .build();
/// let mut akismet = Akismet::new(config)?;
/// akismet
///     .map("Post", CommentField::Author, "author")
///     .map("Post", CommentField::AuthorEmail, "email")
///     .map("Post", CommentField::AuthorUrl, "url")
///     .map("Post", CommentField::Content, "text");
///
/// let post = Post {
///     author: "jriga".into(),
///     email: "jriga@lamit.com".into(),
///     url: "http://www.lamit.com".into(),
///     text: "Nice post".into(),
/// };
/// let request = CommentEnvelope::builder()
///     .user_ip("192.168.0.1")
///     .user_agent("Mozilla/5.0")
///     .build();
/// if akismet.check(&post, request)? {
///     println!("spam");
/// }
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "sync"))]
/// # fn main() {}
/// ```
#[cfg(feature = "sync")]
pub type SyncAkismet = Akismet<SyncClient>;

#[cfg(feature = "async")]
pub use backend::async_client::AsyncClient;
/// ### Asynchronous Client
///
/// This example demonstrates how to check a comment using the asynchronous client.
///
/// ```rust,no_run
/// use akismet_client::{commentable, Akismet, CommentEnvelope, Config};
///
/// struct Comment {
///     comment_author: String,
///     comment_author_email: String,
///     comment_author_url: Option<String>,
///     comment_content: String,
/// }
/// commentable!(Comment { comment_author, comment_author_email, comment_author_url, comment_content });
///
/// # #[cfg(feature = "async")]
/// # #[tokio::main]
/// # async fn main() -> Result<(), akismet_client::AkismetError> {
/// let config = Config::builder()
///     .api_key("1234g54w5g54")
///     .blog("http://blog.com")
///     .build();
/// let akismet = Akismet::new(config)?;
///
/// let comment = Comment {
///     comment_author: "paul".into(),
///     comment_author_email: "paul@example.com".into(),
///     comment_author_url: None,
///     comment_content: "Buy now".into(),
/// };
/// let request = CommentEnvelope::builder()
///     .user_ip("192.168.0.1")
///     .user_agent("curl-5")
///     .build();
/// match akismet.check(&comment, request.clone()).await {
///     Ok(true) => { akismet.submit_spam(&comment, request).await?; }
///     Ok(false) => println!("ham"),
///     Err(e) => eprintln!("Error checking comment: {}", e),
/// }
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "async"))]
/// # fn main() {}
/// ```
#[cfg(feature = "async")]
pub type AsyncAkismet = Akismet<AsyncClient>;
