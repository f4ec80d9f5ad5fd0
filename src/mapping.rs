//! Field mapping between domain objects and the Akismet comment schema.
//!
//! Akismet expects four comment fields. A domain type exposes its data through
//! [`Commentable::attribute`]; when its attribute names differ from the canonical
//! ones, a [`FieldMapping`] declared once per type in the [`MappingRegistry`] says
//! which attribute stands in for which field.
//!
//! ```rust
//! use akismet_client::commentable;
//! use akismet_client::mapping::{resolve, CommentField, MappingRegistry};
//!
//! struct Post {
//!     author: String,
//!     email: String,
//!     url: Option<String>,
//!     text: String,
//! }
//! commentable!(Post { author, email, url, text });
//!
//! let mut registry = MappingRegistry::new();
//! registry.map("Post", CommentField::Author, "author");
//! registry.map("Post", CommentField::Content, "text");
//!
//! let post = Post {
//!     author: "jriga".into(),
//!     email: "jriga@lamit.com".into(),
//!     url: None,
//!     text: "hello".into(),
//! };
//! assert_eq!(resolve(&registry, &post, CommentField::Author).unwrap(), Some("jriga".to_string()));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AkismetError;

/// The canonical comment fields of the Akismet request schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentField {
    Author,
    AuthorEmail,
    AuthorUrl,
    Content,
}

impl CommentField {
    /// All fields, in the order they are resolved
    pub const ALL: [CommentField; 4] = [
        CommentField::Author,
        CommentField::AuthorEmail,
        CommentField::AuthorUrl,
        CommentField::Content,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentField::Author => "comment_author",
            CommentField::AuthorEmail => "comment_author_email",
            CommentField::AuthorUrl => "comment_author_url",
            CommentField::Content => "comment_content",
        }
    }
}

impl fmt::Display for CommentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentField {
    type Err = AkismetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommentField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AkismetError::ConfigError(format!("unknown comment field `{s}`")))
    }
}

/// A domain object that can be checked against Akismet.
pub trait Commentable {
    /// Type label sent as `comment_type`; also the key of the type's mapping table.
    fn comment_type(&self) -> Cow<'_, str>;

    /// Reads an attribute by name.
    ///
    /// Returns `None` when the object has no attribute with that name and
    /// `Some(None)` when it has one whose value is unset.
    fn attribute(&self, name: &str) -> Option<Option<String>>;
}

impl<C: Commentable + ?Sized> Commentable for &C {
    fn comment_type(&self) -> Cow<'_, str> {
        (**self).comment_type()
    }

    fn attribute(&self, name: &str) -> Option<Option<String>> {
        (**self).attribute(name)
    }
}

/// Conversion of a struct field into an attribute value
pub trait AttributeValue {
    fn to_attribute(&self) -> Option<String>;
}

impl AttributeValue for String {
    fn to_attribute(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl AttributeValue for &str {
    fn to_attribute(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

impl<T: AttributeValue> AttributeValue for Option<T> {
    fn to_attribute(&self) -> Option<String> {
        self.as_ref().and_then(AttributeValue::to_attribute)
    }
}

/// Implements [`Commentable`] for a struct, exposing the listed fields as attributes.
///
/// The type name is used as `comment_type`.
#[macro_export]
macro_rules! commentable {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::mapping::Commentable for $ty {
            fn comment_type(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(stringify!($ty))
            }

            fn attribute(&self, name: &str) -> Option<Option<String>> {
                match name {
                    $(stringify!($field) => Some($crate::mapping::AttributeValue::to_attribute(&self.$field)),)*
                    _ => None,
                }
            }
        }
    };
}

/// Mapping table of one domain type: canonical field to attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    fields: HashMap<CommentField, String>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `capability` as the source of `field`; replaces earlier declarations
    pub fn map(&mut self, field: CommentField, capability: impl Into<String>) -> &mut Self {
        self.fields.insert(field, capability.into());
        self
    }

    pub fn get(&self, field: CommentField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Mapping tables of all known domain types, keyed by `comment_type`
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    types: HashMap<String, FieldMapping>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a mapping for `comment_type`. Declarations accumulate; the last one
    /// for a given field wins.
    pub fn map(
        &mut self,
        comment_type: impl Into<String>,
        field: CommentField,
        capability: impl Into<String>,
    ) -> &mut Self {
        self.types
            .entry(comment_type.into())
            .or_default()
            .map(field, capability);
        self
    }

    pub fn mapping(&self, comment_type: &str) -> Option<&FieldMapping> {
        self.types.get(comment_type)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Resolve one canonical field of `object`.
///
/// A declared mapping is followed strictly: if its target attribute does not
/// exist the result is a `MappingError`, never a fallback to the canonical name.
pub fn resolve<C: Commentable + ?Sized>(
    registry: &MappingRegistry,
    object: &C,
    field: CommentField,
) -> Result<Option<String>, AkismetError> {
    let comment_type = object.comment_type();
    let declared = registry
        .mapping(&comment_type)
        .and_then(|mapping| mapping.get(field));

    match declared {
        Some(capability) => {
            object
                .attribute(capability)
                .ok_or_else(|| AkismetError::MappingError {
                    comment_type: comment_type.to_string(),
                    field: field.as_str().to_string(),
                    capability: capability.to_string(),
                })
        }
        None => object
            .attribute(field.as_str())
            .ok_or_else(|| AkismetError::AttributeMissing {
                comment_type: comment_type.to_string(),
                attribute: field.as_str().to_string(),
            }),
    }
}

/// Resolve the four canonical fields, stopping at the first failure
pub fn resolve_all<C: Commentable + ?Sized>(
    registry: &MappingRegistry,
    object: &C,
) -> Result<Vec<(CommentField, Option<String>)>, AkismetError> {
    CommentField::ALL
        .into_iter()
        .map(|field| resolve(registry, object, field).map(|value| (field, value)))
        .collect()
}
