//! Shared fixtures: a recording transport and a couple of comment types.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use akismet_client::backend::Transport;
use akismet_client::error::AkismetError;
use akismet_client::{commentable, Akismet, CommentField, Config};
use bytes::Bytes;
use url::Url;

/// One request seen by `StubTransport`
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub form: HashMap<String, String>,
    pub headers: Vec<(String, String)>,
}

impl Call {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that records every call and answers from a queue of canned replies.
/// An exhausted queue answers with an empty body.
#[derive(Clone, Default)]
pub struct StubTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
}

impl StubTransport {
    pub fn replying(replies: &[&str]) -> Self {
        let stub = StubTransport::default();
        for reply in replies {
            stub.push_reply(Ok(reply.to_string()));
        }
        stub
    }

    pub fn push_reply(&self, reply: Result<String, String>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[maybe_async::maybe_async]
impl Transport for StubTransport {
    async fn post(
        &self,
        url: &Url,
        body: Bytes,
        headers: &[(&'static str, &str)],
    ) -> Result<String, AkismetError> {
        let form = serde_urlencoded::from_bytes::<Vec<(String, String)>>(&body)
            .unwrap()
            .into_iter()
            .collect();
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            form,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(AkismetError::HttpError(message)),
            None => Ok(String::new()),
        }
    }
}

/// Exposes the canonical attribute names directly
pub struct Comment {
    pub comment_author: Option<String>,
    pub comment_author_email: String,
    pub comment_author_url: String,
    pub comment_content: String,
}
commentable!(Comment {
    comment_author,
    comment_author_email,
    comment_author_url,
    comment_content,
});

/// Needs a mapping to be usable
pub struct Foo {
    pub author: String,
    pub email: String,
    pub url: String,
    pub text: String,
}
commentable!(Foo { author, email, url, text });

pub fn comment() -> Comment {
    Comment {
        comment_author: Some("jriga".to_string()),
        comment_author_email: "jriga@lamit.com".to_string(),
        comment_author_url: "http://www.lamit.com".to_string(),
        comment_content: "blah ".repeat(10),
    }
}

pub fn foo() -> Foo {
    Foo {
        author: "jriga".to_string(),
        email: "jriga@lamit.com".to_string(),
        url: "http://www.lamit.com".to_string(),
        text: "blah ".repeat(10),
    }
}

pub fn config() -> Config {
    Config::builder()
        .api_key("1234g54w5g54")
        .blog("http://blog.com")
        .build()
}

pub fn client(config: Config, stub: &StubTransport) -> Akismet<StubTransport> {
    let mut client = Akismet::with_transport(config, stub.clone());
    client
        .map("Foo", CommentField::Author, "author")
        .map("Foo", CommentField::AuthorEmail, "email")
        .map("Foo", CommentField::AuthorUrl, "url")
        .map("Foo", CommentField::Content, "text");
    client
}

pub fn request_fields() -> [(&'static str, &'static str); 2] {
    [("user_ip", "192.168.0.1"), ("user_agent", "curl-5")]
}
