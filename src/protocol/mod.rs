//! Akismet wire protocol: endpoints and request bodies.

pub mod commands;
pub mod payload;

pub use commands::{AkismetCommand, AkismetEndpoint};
pub use payload::{parse_verdict, Payload};
