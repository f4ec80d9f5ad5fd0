//! Request bodies and reply interpretation

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;

use crate::error::AkismetError;
use crate::mapping::{resolve_all, Commentable, MappingRegistry};

/// Field values of one request. A `None` value is a null field and is left out of
/// the encoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload(BTreeMap<String, Option<String>>);

impl Payload {
	/// Base payload of a comment: the blog, the comment type and the four resolved
	/// comment fields.
	pub fn compose<C: Commentable + ?Sized>(
		registry: &MappingRegistry,
		object: &C,
		blog: &str,
	) -> Result<Payload, AkismetError> {
		let mut payload = Payload::default();
		for (field, value) in resolve_all(registry, object)? {
			payload.insert(field.as_str(), value);
		}
		payload.insert("blog", Some(blog.to_string()));
		payload.insert("comment_type", Some(object.comment_type().into_owned()));
		Ok(payload)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
		self.0.insert(key.into(), value);
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(|v| v.as_deref())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Merge `extra` into the payload; on a key collision the extra value wins.
	pub fn merge<I>(&mut self, extra: I)
	where
		I: IntoIterator<Item = (String, String)>,
	{
		for (key, value) in extra {
			self.0.insert(key, Some(value));
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
	}

	/// `application/x-www-form-urlencoded` body, null fields omitted
	pub fn to_form(&self) -> Result<Bytes, AkismetError> {
		let pairs: Vec<(&str, &str)> = self
			.0
			.iter()
			.filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
			.collect();
		Ok(serde_urlencoded::to_string(pairs)?.into())
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for Payload {
	fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
		Payload(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.map(Into::into)))
				.collect(),
		)
	}
}

/// Body of a `verify-key` request
#[derive(Debug, Serialize)]
pub struct VerifyKeyForm<'a> {
	pub key: &'a str,
	pub blog: &'a str,
}

impl VerifyKeyForm<'_> {
	pub fn to_form(&self) -> Result<Bytes, AkismetError> {
		Ok(serde_urlencoded::to_string(self)?.into())
	}
}

/// Reply of `comment-check`, `submit-spam` and `submit-ham`: only the literal
/// `true` is a positive answer.
pub fn parse_verdict(body: &str) -> bool {
	body == "true"
}

/// Reply of `verify-key`
pub fn is_valid_key(body: &str) -> bool {
	body == "valid"
}
