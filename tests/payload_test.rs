mod common;

use std::collections::HashMap;

use akismet_client::error::AkismetError;
use akismet_client::protocol::Payload;
use akismet_client::CommentEnvelope;
use common::*;

fn expected(author: &str) -> Payload {
    [
        ("blog", Some("http://my_blog.com".to_string())),
        ("comment_type", Some("Foo".to_string())),
        ("comment_author", Some(author.to_string())),
        ("comment_author_email", Some("jriga@lamit.com".to_string())),
        ("comment_author_url", Some("http://www.lamit.com".to_string())),
        ("comment_content", Some("blah ".repeat(10))),
    ]
    .into_iter()
    .collect()
}

fn server_vars() -> HashMap<String, String> {
    [
        ("PATH_INFO", "/"),
        ("REMOTE_HOST", "127.0.0.1"),
        ("HTTP_USER_AGENT", "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10.5; en-US; rv:1.9.0.5) Gecko/2008120121 Firefox/3.0.5"),
        ("HTTP_HOST", "localhost:7000"),
        ("REMOTE_ADDR", "127.0.0.1"),
        ("HTTP_KEEP_ALIVE", "300"),
        ("REQUEST_PATH", "/"),
        ("HTTP_VERSION", "HTTP/1.1"),
        ("REQUEST_URI", "http://localhost:7000/"),
        ("QUERY_STRING", ""),
        ("REQUEST_METHOD", "GET"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn payload_from_mapped_fields() {
    let stub = StubTransport::default();
    let akismet = client(config(), &stub);
    akismet.setup(|c| c.blog = Some("http://my_blog.com".to_string()));

    let payload = akismet.payload(&foo(), CommentEnvelope::default()).unwrap();
    assert_eq!(payload, expected("jriga"));
    assert_eq!(stub.call_count(), 0);
}

#[test]
fn payload_from_default_fields() {
    let stub = StubTransport::default();
    let akismet = client(config(), &stub);
    akismet.setup(|c| c.blog = Some("http://my_blog.com".to_string()));

    let payload = akismet.payload(&comment(), CommentEnvelope::default()).unwrap();
    assert_eq!(payload.get("comment_type"), Some("Comment"));
    assert_eq!(payload.get("comment_author"), Some("jriga"));
    assert_eq!(payload.len(), 6);
}

#[test]
fn payload_with_server_params() {
    let akismet = client(config(), &StubTransport::default());
    akismet.setup(|c| c.blog = Some("http://my_blog.com".to_string()));

    let mut additional_fields = server_vars();
    additional_fields.insert("comment_author".to_string(), "paul".to_string());
    let request = CommentEnvelope::builder()
        .user_ip("192.168.0.1")
        .user_agent("curl-5")
        .referrer("")
        .permalink("http://blog.com/posts/2009/01/21/first-entry")
        .additional_fields(additional_fields)
        .build();

    let payload = akismet.payload(&foo(), request).unwrap();

    let mut expected = expected("paul");
    expected.insert("user_ip", Some("192.168.0.1".to_string()));
    expected.insert("user_agent", Some("curl-5".to_string()));
    expected.insert("referrer", Some(String::new()));
    expected.insert(
        "permalink",
        Some("http://blog.com/posts/2009/01/21/first-entry".to_string()),
    );
    for (key, value) in server_vars() {
        expected.insert(key, Some(value));
    }
    assert_eq!(payload, expected);
}

#[test]
fn payload_needs_blog() {
    let akismet = client(akismet_client::Config::default(), &StubTransport::default());
    let err = akismet.payload(&foo(), CommentEnvelope::default()).unwrap_err();
    assert!(matches!(err, AkismetError::FieldMissing(_)));
}

#[test]
fn unmapped_type_without_canonical_attributes() {
    let akismet = akismet_client::Akismet::with_transport(config(), StubTransport::default());
    let err = akismet.payload(&foo(), CommentEnvelope::default()).unwrap_err();
    assert!(matches!(
        err,
        AkismetError::AttributeMissing { ref attribute, .. } if attribute == "comment_author"
    ));
}
